use maud::{html, Markup};

use super::layout::{page, SITE_NAME};
use super::routes::url;

pub fn index_page() -> Markup {
    page(
        "Home",
        html! {
            h1 { "Welcome to " (SITE_NAME) }
            ul {
                li { a href=(url("profiles:index", &[])) { "Profiles" } }
                li { a href=(url("lettings:index", &[])) { "Lettings" } }
            }
        },
    )
}

fn error_page(title: &str, heading: &str, message: &str) -> Markup {
    page(
        title,
        html! {
            h1 { (heading) }
            p { (message) }
            a href=(url("index", &[])) { "Back to home" }
        },
    )
}

pub fn not_found_page() -> Markup {
    error_page(
        "404",
        "Page not found",
        "The page you are looking for does not exist or has been moved.",
    )
}

pub fn server_error_page() -> Markup {
    error_page(
        "500",
        "Server error",
        "Something went wrong on our side. Please try again later.",
    )
}

pub fn forbidden_page() -> Markup {
    error_page(
        "403",
        "Access denied",
        "You do not have permission to view this page.",
    )
}
