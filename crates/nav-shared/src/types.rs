//! Common types

use uuid::Uuid;

/// Primary key of menus and menu items.
pub type RecordId = i64;

/// Identifier of the administrator performing an action.
pub type ActorId = Uuid;

/// `0` and negative ids coming from forms mean "none".
pub fn positive_id(id: Option<RecordId>) -> Option<RecordId> {
    id.filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_id() {
        assert_eq!(positive_id(Some(4)), Some(4));
        assert_eq!(positive_id(Some(0)), None);
        assert_eq!(positive_id(Some(-3)), None);
        assert_eq!(positive_id(None), None);
    }
}
