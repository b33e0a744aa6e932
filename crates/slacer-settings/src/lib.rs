//! SLAcer Settings Crate
//!
//! Path-addressed settings store, the settings model that backs every UI
//! control, panel layout persistence, and snapshot load/save.

pub mod case;
pub mod defaults;
pub mod error;
pub mod manager;
pub mod model;
pub mod panels;
pub mod path_store;
pub mod persistence;
pub mod sections;

pub use error::{PersistenceError, SettingsError, SettingsResult};
pub use manager::SettingsManager;
pub use model::{ChangeListener, SettingsModel};
pub use panels::{panel_element_id, PanelsByPosition};
pub use path_store::{merge_values, PathStore};
pub use persistence::{SettingsPersistence, SnapshotFormat};
pub use sections::{
    BuildVolumeSettings, Measurement, MeshSettings, PanelState, ResinSettings, ScreenSettings,
    Size3, ViewerSettings,
};
