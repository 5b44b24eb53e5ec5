//! Dock layout for the loaded data: map on the left, table on the right.
//!
//! ```text
//! ┌──────────────────────────┬─────────────────┐
//! │                          │                 │
//! │        Map View          │   Attributes    │
//! │                          │                 │
//! └──────────────────────────┴─────────────────┘
//! ```

use egui_dock::{DockState, NodeIndex};

/// Share of the width given to the map.
const MAP_FRACTION: f32 = 0.6;

/// Panel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Map,
    Attributes,
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelId::Map => write!(f, "Map"),
            PanelId::Attributes => write!(f, "Attributes"),
        }
    }
}

/// Create the map/table split with an adjustable divider.
pub fn create_dock_state() -> DockState<PanelId> {
    let mut dock_state = DockState::new(vec![PanelId::Map]);
    let [_map, _table] = dock_state.main_surface_mut().split_right(
        NodeIndex::root(),
        MAP_FRACTION,
        vec![PanelId::Attributes],
    );
    dock_state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_panels_present() {
        let dock = create_dock_state();
        let tabs: Vec<PanelId> = dock.iter_all_tabs().map(|(_, tab)| *tab).collect();
        assert_eq!(tabs.len(), 2);
        assert!(tabs.contains(&PanelId::Map));
        assert!(tabs.contains(&PanelId::Attributes));
    }
}
