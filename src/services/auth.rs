//! Current-user identity as consumed by the editor. Credential handling
//! lives outside this crate.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SESSION_KEY: &str = "word-graph:session";

#[derive(Debug, Error)]
pub enum AuthError {
	#[error("session storage unavailable: {0}")]
	Unavailable(String),
	#[error("malformed session: {0}")]
	Malformed(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
	pub id: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
}

impl UserIdentity {
	/// Username, then full name, then the email's local part.
	pub fn display_name(&self) -> String {
		let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
		non_empty(&self.username)
			.or_else(|| non_empty(&self.name))
			.or_else(|| {
				self.email
					.as_deref()
					.and_then(|e| e.split('@').next())
					.filter(|local| !local.is_empty())
					.map(str::to_string)
			})
			.unwrap_or_else(|| "User".to_string())
	}

	/// Avatar letter.
	pub fn initial(&self) -> String {
		let first = |s: &Option<String>| s.as_deref().and_then(|s| s.chars().next());
		first(&self.username)
			.or_else(|| first(&self.name))
			.map(String::from)
			.or_else(|| first(&self.email).map(|c| c.to_uppercase().collect()))
			.unwrap_or_else(|| "U".to_string())
	}
}

pub trait AuthSession {
	fn current_user(&self) -> Option<UserIdentity>;
	fn sign_out(&mut self) -> Result<(), AuthError>;
}

/// Session remembered in the browser's `localStorage`.
#[derive(Default)]
pub struct LocalSession {
	user: Option<UserIdentity>,
}

impl LocalSession {
	/// Pick up a previously stored session, if any.
	pub fn restore() -> Self {
		let user = match Self::read() {
			Ok(user) => user,
			Err(e) => {
				warn!("could not restore session: {e}");
				None
			}
		};
		Self { user }
	}

	pub fn sign_in(&mut self, user: UserIdentity) -> Result<(), AuthError> {
		let raw = serde_json::to_string(&user)?;
		Self::storage()?
			.set_item(SESSION_KEY, &raw)
			.map_err(|e| AuthError::Unavailable(format!("{e:?}")))?;
		info!("signed in as {}", user.display_name());
		self.user = Some(user);
		Ok(())
	}

	fn storage() -> Result<web_sys::Storage, AuthError> {
		web_sys::window()
			.ok_or_else(|| AuthError::Unavailable("no window".into()))?
			.local_storage()
			.map_err(|e| AuthError::Unavailable(format!("{e:?}")))?
			.ok_or_else(|| AuthError::Unavailable("localStorage disabled".into()))
	}

	fn read() -> Result<Option<UserIdentity>, AuthError> {
		let raw = Self::storage()?
			.get_item(SESSION_KEY)
			.map_err(|e| AuthError::Unavailable(format!("{e:?}")))?;
		Ok(raw.map(|r| serde_json::from_str(&r)).transpose()?)
	}
}

impl AuthSession for LocalSession {
	fn current_user(&self) -> Option<UserIdentity> {
		self.user.clone()
	}

	fn sign_out(&mut self) -> Result<(), AuthError> {
		self.user = None;
		Self::storage()?
			.remove_item(SESSION_KEY)
			.map_err(|e| AuthError::Unavailable(format!("{e:?}")))?;
		info!("signed out");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(email: Option<&str>, username: Option<&str>, name: Option<&str>) -> UserIdentity {
		UserIdentity {
			id: "u1".into(),
			email: email.map(Into::into),
			username: username.map(Into::into),
			name: name.map(Into::into),
		}
	}

	#[test]
	fn display_name_prefers_username_then_name_then_email() {
		assert_eq!(user(Some("kim@x.io"), Some("minji"), Some("Kim")).display_name(), "minji");
		assert_eq!(user(Some("kim@x.io"), None, Some("Kim")).display_name(), "Kim");
		assert_eq!(user(Some("kim@x.io"), None, None).display_name(), "kim");
		assert_eq!(user(None, None, None).display_name(), "User");
	}

	#[test]
	fn initial_upper_cases_email_only() {
		assert_eq!(user(Some("kim@x.io"), Some("minji"), None).initial(), "m");
		assert_eq!(user(Some("kim@x.io"), None, None).initial(), "K");
		assert_eq!(user(None, None, None).initial(), "U");
	}
}
