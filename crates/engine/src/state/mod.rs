pub mod display;
pub mod settings;

pub use display::{DisplayState, IsolationMode};
pub use settings::AppSettings;

use shared::ObjectId;

/// Combined viewer-side state
pub struct ViewerState {
    pub display: DisplayState,
    pub settings: AppSettings,
    /// Node currently under the pointer (fed by the picking boundary)
    pub hovered_id: Option<ObjectId>,
    /// Current exploded-view factor in [0, 1]
    pub explosion_factor: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            display: DisplayState::default(),
            settings: AppSettings::load(),
            hovered_id: None,
            explosion_factor: 0.0,
        }
    }
}
