use axum::response::Html;
use maud::{html, Markup, DOCTYPE};

use super::routes::url;

pub const SITE_NAME: &str = "Holiday Homes";

/// Shared page chrome: head, navigation and content area.
pub fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
            }
            body {
                header {
                    nav {
                        a href=(url("index", &[])) { (SITE_NAME) }
                        " "
                        a href=(url("lettings:index", &[])) { "Lettings" }
                        " "
                        a href=(url("profiles:index", &[])) { "Profiles" }
                    }
                }
                main { (content) }
            }
        }
    }
}

// maud's own axum integration tracks a different axum release, so wrap the
// string ourselves.
pub fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}
