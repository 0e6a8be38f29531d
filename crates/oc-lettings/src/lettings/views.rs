use maud::{html, Markup};
use serde::Serialize;

use super::domain::{Address, Letting};
use super::repository::LettingRepository;
use crate::site::layout::page;
use crate::site::routes::url;
use crate::storage::StorageError;

/// Data handed to the lettings list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LettingsIndexContext {
    pub lettings_list: Vec<Letting>,
}

impl LettingsIndexContext {
    pub async fn load(repository: &dyn LettingRepository) -> Result<Self, StorageError> {
        Ok(Self {
            lettings_list: repository.list().await?,
        })
    }
}

/// Data handed to a letting's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LettingDetailContext {
    pub title: String,
    pub address: Address,
}

impl LettingDetailContext {
    /// `None` when the letting does not exist.
    pub async fn load(
        repository: &dyn LettingRepository,
        letting_id: i64,
    ) -> Result<Option<Self>, StorageError> {
        let letting = repository.fetch(letting_id).await?;
        Ok(letting.map(|letting| Self {
            title: letting.title,
            address: letting.address,
        }))
    }
}

fn letting_url(id: i64) -> String {
    let id = id.to_string();
    url("lettings:letting", &[("letting_id", id.as_str())])
}

pub fn index_page(context: &LettingsIndexContext) -> Markup {
    page(
        "Lettings",
        html! {
            h1 { "Lettings" }
            @if context.lettings_list.is_empty() {
                p { "No lettings are available." }
            } @else {
                ul {
                    @for letting in &context.lettings_list {
                        li {
                            a href=(letting_url(letting.id)) {
                                (letting.title)
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn letting_page(context: &LettingDetailContext) -> Markup {
    let address = &context.address;
    page(
        &context.title,
        html! {
            h1 { (context.title) }
            address {
                p { (address.number) " " (address.street) }
                p { (address.locality()) }
                p { (address.country_iso_code) }
            }
            a href=(url("lettings:index", &[])) { "Back to lettings" }
        },
    )
}
