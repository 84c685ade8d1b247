#![allow(warnings)]

table! {
    episodio (item_id) {
        item_id -> Text,
        duration_ms -> BigInt,
        release_date -> Text,
        name -> Text,
        description -> Text,
    }
}
