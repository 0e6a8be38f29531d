use axum::extract::State;
use axum::response::Html;
use tracing::{debug, info, warn};

use super::views::{self, LettingDetailContext, LettingsIndexContext};
use crate::site::layout::render;
use crate::site::{ClientMeta, PageSegment, SiteError, SiteState};

pub(crate) async fn index(
    State(state): State<SiteState>,
    client: ClientMeta,
) -> Result<Html<String>, SiteError> {
    info!(
        client.addr = %client.addr(),
        client.user_agent = %client.agent(),
        "lettings index requested"
    );

    let context = LettingsIndexContext::load(state.lettings.as_ref()).await?;
    debug!(count = context.lettings_list.len(), "lettings loaded");
    Ok(render(views::index_page(&context)))
}

pub(crate) async fn letting(
    State(state): State<SiteState>,
    PageSegment(letting_id): PageSegment,
    client: ClientMeta,
) -> Result<Html<String>, SiteError> {
    info!(
        letting_id = %letting_id,
        client.addr = %client.addr(),
        "letting detail requested"
    );

    let Some(id) = parse_letting_id(&letting_id) else {
        warn!(letting_id = %letting_id, "letting id is not a storable integer");
        return Err(SiteError::NotFound(format!("no letting with id {letting_id}")));
    };

    match LettingDetailContext::load(state.lettings.as_ref(), id).await? {
        Some(context) => {
            info!(letting_id = id, title = %context.title, "letting found");
            Ok(render(views::letting_page(&context)))
        }
        None => {
            warn!(letting_id = id, "letting not found");
            Err(SiteError::NotFound(format!("no letting with id {id}")))
        }
    }
}

/// Digits only, and small enough for an SQLite rowid.
fn parse_letting_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
