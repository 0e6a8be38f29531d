use maud::{html, Markup};
use serde::Serialize;

use super::domain::Profile;
use super::repository::ProfileRepository;
use crate::site::layout::page;
use crate::site::routes::url;
use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilesIndexContext {
    pub profiles_list: Vec<Profile>,
}

impl ProfilesIndexContext {
    pub async fn load(repository: &dyn ProfileRepository) -> Result<Self, StorageError> {
        Ok(Self {
            profiles_list: repository.list().await?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDetailContext {
    pub profile: Profile,
}

impl ProfileDetailContext {
    pub async fn load(
        repository: &dyn ProfileRepository,
        username: &str,
    ) -> Result<Option<Self>, StorageError> {
        let profile = repository.fetch_by_username(username).await?;
        Ok(profile.map(|profile| Self { profile }))
    }
}

pub fn index_page(context: &ProfilesIndexContext) -> Markup {
    page(
        "Profiles",
        html! {
            h1 { "Profiles" }
            @if context.profiles_list.is_empty() {
                p { "No profiles are available." }
            } @else {
                ul {
                    @for profile in &context.profiles_list {
                        li {
                            a href=(url("profiles:profile", &[("username", profile.user.username.as_str())])) {
                                (profile.user.username)
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn profile_page(context: &ProfileDetailContext) -> Markup {
    let profile = &context.profile;
    let user = &profile.user;
    page(
        &user.username,
        html! {
            h1 { (user.username) }
            dl {
                @if !user.first_name.is_empty() || !user.last_name.is_empty() {
                    dt { "Name" }
                    dd { (user.full_name()) }
                }
                @if !user.email.is_empty() {
                    dt { "Email" }
                    dd { (user.email) }
                }
                dt { "Favorite city" }
                dd class="favorite-city" { (profile.favorite_city) }
                dt { "Member since" }
                dd { (user.date_joined.format("%B %Y")) }
            }
            a href=(url("profiles:index", &[])) { "Back to profiles" }
        },
    )
}
