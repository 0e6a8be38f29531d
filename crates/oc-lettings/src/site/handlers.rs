use axum::response::Html;
use tracing::info;

use super::client::ClientMeta;
use super::layout::render;
use super::views;

pub(crate) async fn index(client: ClientMeta) -> Html<String> {
    info!(
        client.addr = %client.addr(),
        client.user_agent = %client.agent(),
        "home page requested"
    );
    render(views::index_page())
}
