use maud::{html, Markup, DOCTYPE};

const LEAFLET: &str = "https://unpkg.com/leaflet@1.9.4/dist";
const MARKERCLUSTER: &str = "https://unpkg.com/leaflet.markercluster@1.5.3/dist";

/// Full-screen shell for the Mini App. Pulls in Telegram's WebApp script,
/// Leaflet with the cluster plugin, htmx and our map script.
pub fn mini_app_layout(title: &str, expand_on_launch: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="uz" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=no";
                title { (title) }
                link rel="stylesheet" href={ (LEAFLET) "/leaflet.css" };
                link rel="stylesheet" href={ (MARKERCLUSTER) "/MarkerCluster.css" };
                link rel="stylesheet" href={ (MARKERCLUSTER) "/MarkerCluster.Default.css" };
                link rel="stylesheet" href="/static/main.css";
                script src="https://telegram.org/js/telegram-web-app.js" {}
                script src={ (LEAFLET) "/leaflet.js" } {}
                script src={ (MARKERCLUSTER) "/leaflet.markercluster.js" } {}
                script src="https://unpkg.com/htmx.org@1.9.12" {}
                script src="/static/map.js" defer {}
            }
            body data-expand=(expand_on_launch) {
                (content)
            }
        }
    }
}
