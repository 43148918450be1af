diesel::table! {
    messages (id) {
        id -> Integer,
        sender -> Text,
        receiver -> Text,
        message -> Text,
        subject -> Text,
        status -> Text,
        creation_date -> Text,
    }
}
