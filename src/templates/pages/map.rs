// templates/pages/map.rs

use crate::templates::{
    components::{delivery_result, loader, map_status},
    detail_panel, mini_app_layout,
};
use crate::view::Phase;
use maud::{html, Markup};

/// Everything the map page needs from the view.
pub struct MapPageVm {
    pub phase: Phase,
    pub marker_count: usize,
    pub expand_on_launch: bool,
}

pub fn map_page(vm: &MapPageVm) -> Markup {
    // The first load starts as soon as the script asks for /api/map.
    let loading = !matches!(vm.phase, Phase::Loaded | Phase::Failed(_));

    mini_app_layout(
        "E'lonlar xaritasi",
        vm.expand_on_launch,
        html! {
            div id="map" {}
            (loader(loading))
            div id="map-status" { (map_status(&vm.phase, vm.marker_count)) }
            (detail_panel(None))
            div id="details-result" { (delivery_result(None)) }
        },
    )
}
