//! One menu per placement slot

use std::sync::Arc;

use tracing::warn;

use nav_shared::RecordId;

use crate::domain::Menu;
use crate::error::DomainError;
use crate::repositories::MenuRepository;

pub struct LocationGuard<R: MenuRepository + ?Sized> {
    menu_repo: Arc<R>,
}

impl<R: MenuRepository + ?Sized> LocationGuard<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self { menu_repo }
    }

    /// Another menu already bound to `location`, if any.
    pub async fn find_conflict(&self, location: &str, exclude_id: Option<RecordId>) -> Result<Option<Menu>, DomainError> {
        self.menu_repo.find_by_location(location, exclude_id).await
    }

    /// Fails with the holder's name so the administrator can free the slot.
    pub async fn ensure_free(&self, location: Option<&str>, exclude_id: Option<RecordId>) -> Result<(), DomainError> {
        let Some(location) = location else {
            return Ok(());
        };
        match self.find_conflict(location, exclude_id).await? {
            Some(holder) => {
                warn!("Location {} already held by menu {} ({})", location, holder.id, holder.name);
                Err(DomainError::LocationTaken {
                    location: location.to_string(),
                    menu_id: holder.id,
                    menu_name: holder.name,
                })
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_conflict_names_holder() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_location().returning(|location, _| {
            let mut menu = Menu::new("Main".into(), "main".into(), Some(location.to_string()), None, Uuid::nil())?;
            menu.id = 1;
            Ok(Some(menu))
        });
        let guard = LocationGuard::new(Arc::new(repo));

        let err = guard.ensure_free(Some("primary"), None).await.unwrap_err();
        match err {
            DomainError::LocationTaken { location, menu_id, menu_name } => {
                assert_eq!(location, "primary");
                assert_eq!(menu_id, 1);
                assert_eq!(menu_name, "Main");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unplaced_menu_never_conflicts() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_location().never();
        let guard = LocationGuard::new(Arc::new(repo));
        assert!(guard.ensure_free(None, Some(3)).await.is_ok());
    }
}
