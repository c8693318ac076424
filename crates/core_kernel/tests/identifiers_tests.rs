//! Comprehensive unit tests for the Identifiers module
//!
//! Tests cover all identifier types, their creation, parsing,
//! conversion, and display formatting.

use core_kernel::{CardId, UserId};
use uuid::Uuid;

mod card_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = CardId::new();
        let id2 = CardId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = CardId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = CardId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = CardId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_display_format() {
        let id = CardId::new();
        let display = id.to_string();
        assert!(display.starts_with("card-"));
    }

    #[test]
    fn test_parse_with_prefix() {
        let id = CardId::new();
        let parsed: CardId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: CardId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_invalid_string_fails() {
        assert!("not-a-uuid".parse::<CardId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = CardId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

mod user_id_tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        assert_eq!(CardId::prefix(), "card");
        assert_eq!(UserId::prefix(), "user");
    }

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new_v7();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_conversion_to_and_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: CardId = uuid.into();
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }
}
