//! Sidebar panel layout
//!
//! Panel order and collapse state live inside each namespace as
//! `<namespace>.panel.{position,collapsed}`. Reordering must report the
//! complete list of panel namespaces so positions stay unique and contiguous.

use crate::case::{camel_case, kebab_case};
use crate::error::SettingsResult;
use crate::model::SettingsModel;
use crate::path_store::PathStore;
use crate::sections::PanelState;
use serde_json::{json, Value};
use slacer_core::StoreError;
use tracing::debug;

impl SettingsModel {
    /// Persist a new panel order, one position per namespace index
    ///
    /// Callers pass every panel namespace; a partial list leaves stale
    /// positions on the omitted ones.
    pub fn record_panel_order<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), StoreError> {
        for (position, name) in names.iter().enumerate() {
            let namespace = camel_case(name.as_ref());
            self.set(&format!("{}.panel.position", namespace), json!(position))?;
        }
        debug!("Recorded order of {} panels", names.len());
        Ok(())
    }

    /// Persist whether a panel is collapsed
    pub fn record_panel_collapse(&mut self, namespace: &str, collapsed: bool) -> Result<(), StoreError> {
        self.set(&format!("{}.panel.collapsed", camel_case(namespace)), json!(collapsed))
    }

    /// Panel record of `namespace`
    pub fn panel(&self, namespace: &str) -> SettingsResult<PanelState> {
        self.get_as(&format!("{}.panel", camel_case(namespace)))
    }

    /// Namespaces that carry a panel record
    pub fn panel_namespaces(&self) -> Vec<String> {
        self.store
            .namespaces()
            .filter(|(_, value)| value.get("panel").is_some_and(Value::is_object))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Panel namespaces in ascending position order
    ///
    /// Namespaces without a panel record, or whose position is not an
    /// integer, are skipped. When two panels share a position their relative
    /// order is unspecified.
    pub fn panels_by_position(&self) -> PanelsByPosition<'_> {
        PanelsByPosition {
            store: &self.store,
            ordered: None,
            cursor: 0,
        }
    }
}

/// DOM element id of a namespace's panel (`buildVolume` -> `build-volume`)
pub fn panel_element_id(namespace: &str) -> String {
    kebab_case(namespace)
}

/// Lazy, restartable iterator over panel namespaces ordered by position
///
/// Ordering is computed on the first call to `next`. Clone the iterator or
/// call [`restart`](Self::restart) to walk it again.
#[derive(Debug, Clone)]
pub struct PanelsByPosition<'a> {
    store: &'a PathStore,
    ordered: Option<Vec<&'a str>>,
    cursor: usize,
}

impl<'a> PanelsByPosition<'a> {
    fn order(store: &'a PathStore) -> Vec<&'a str> {
        let mut entries: Vec<(i64, &'a str)> = store
            .namespaces()
            .filter_map(|(name, value)| {
                let position = value.get("panel")?.get("position")?.as_i64()?;
                Some((position, name.as_str()))
            })
            .collect();
        entries.sort_by_key(|(position, _)| *position);
        entries.into_iter().map(|(_, name)| name).collect()
    }

    /// Rewind to the first panel
    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for PanelsByPosition<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let ordered = self.ordered.get_or_insert_with(|| Self::order(store));
        let item = ordered.get(self.cursor).copied();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }
}
