use axum::extract::State;
use axum::response::Html;
use tracing::{debug, info, warn};

use super::views::{self, ProfileDetailContext, ProfilesIndexContext};
use crate::site::layout::render;
use crate::site::{ClientMeta, PageSegment, SiteError, SiteState};

pub(crate) async fn index(
    State(state): State<SiteState>,
    client: ClientMeta,
) -> Result<Html<String>, SiteError> {
    info!(
        client.addr = %client.addr(),
        client.user_agent = %client.agent(),
        "profiles index requested"
    );

    let context = ProfilesIndexContext::load(state.profiles.as_ref()).await?;
    debug!(count = context.profiles_list.len(), "profiles loaded");
    Ok(render(views::index_page(&context)))
}

pub(crate) async fn profile(
    State(state): State<SiteState>,
    PageSegment(username): PageSegment,
    client: ClientMeta,
) -> Result<Html<String>, SiteError> {
    info!(username = %username, client.addr = %client.addr(), "profile requested");

    match ProfileDetailContext::load(state.profiles.as_ref(), &username).await? {
        Some(context) => {
            info!(username = %username, "profile found");
            Ok(render(views::profile_page(&context)))
        }
        None => {
            warn!(username = %username, "profile not found");
            Err(SiteError::NotFound(format!("no profile for user {username}")))
        }
    }
}
