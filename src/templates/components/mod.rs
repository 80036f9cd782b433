use maud::{html, Markup};

use crate::bridge::Delivery;
use crate::domain::Listing;
use crate::view::{DetailPanel, Phase};

pub mod error;

pub use error::html_error_response;

/// Popup bound to a marker: short summary plus the details button.
pub fn marker_popup(listing: &Listing) -> Markup {
    html! {
        strong { (listing.title) }
        br;
        "Turi: " (listing.category.label())
        br;
        "Narxi: " (listing.price) " " (listing.currency)
        br;
        button
            class="popup-details"
            hx-post={ "/listings/" (listing.id) "/details" }
            hx-target="#details-result"
            hx-swap="innerHTML"
        { "Batafsil ma'lumot" }
    }
}

/// The detail panel. `None` renders it empty and hidden.
pub fn detail_panel(panel: Option<&DetailPanel>) -> Markup {
    let class = if panel.is_some() { "details-panel" } else { "details-panel hidden" };

    html! {
        div id="listing-details" class=(class) {
            button
                id="close-details"
                class="close"
                aria-label="Yopish"
                hx-post="/details/close"
                hx-target="#listing-details"
                hx-swap="outerHTML"
            { "×" }

            h3 id="listing-title" { @if let Some(p) = panel { (p.title) } }
            dl {
                dt { "Turi" }
                dd id="listing-category" { @if let Some(p) = panel { (p.category) } }
                dt { "Narxi" }
                dd id="listing-price" { @if let Some(p) = panel { (p.price) } }
                dt { "Qavat" }
                dd id="listing-floor" { @if let Some(p) = panel { (p.floor) } }
                dt { "Xonalar" }
                dd id="listing-rooms" { @if let Some(p) = panel { (p.rooms) } }
            }

            button
                id="show-more"
                class="primary"
                data-listing-id=[panel.map(|p| p.listing_id)]
                hx-post=[panel.map(|p| format!("/listings/{}/details", p.listing_id))]
                hx-target="#details-result"
                hx-swap="innerHTML"
            { "Batafsil ma'lumot" }
        }
    }
}

pub fn loader(visible: bool) -> Markup {
    html! {
        div id="loader" class=(if visible { "loader" } else { "loader hidden" }) {
            span class="spinner" aria-hidden="true" {}
            span class="sr-only" { "Yuklanmoqda..." }
        }
    }
}

/// Banner over the map for the empty and failed states.
pub fn map_status(phase: &Phase, marker_count: usize) -> Markup {
    match phase {
        Phase::Failed(message) => html! {
            div class="map-status error" {
                p { "E'lonlarni yuklab bo'lmadi." }
                p class="microcopy" { (message) }
                button id="retry-load" class="primary" { "Qayta urinish" }
            }
        },
        Phase::Loaded if marker_count == 0 => html! {
            div class="map-status empty" {
                p { "Hozircha faol e'lonlar yo'q." }
                button id="retry-load" { "Yangilash" }
            }
        },
        _ => html! {},
    }
}

/// Result of a detail request, swapped into `#details-result`.
pub fn delivery_result(delivery: Option<&Delivery>) -> Markup {
    html! {
        @match delivery {
            Some(Delivery::Forward { payload }) => {
                // Picked up by map.js and passed to Telegram.WebApp.sendData.
                div id="host-payload" class="hidden" data-payload=(payload) {}
            }
            Some(Delivery::Sent { listing_id }) => {
                p class="details-sent" data-listing-id=(listing_id) { "So'rov yuborildi" }
            }
            Some(Delivery::Notice(message)) => {
                dialog id="details-notice" open {
                    p { (message) }
                    form method="dialog" {
                        button { "OK" }
                    }
                }
            }
            None => {}
        }
    }
}
