diesel::table! {
    todos (id) {
        id -> Varchar,
        title -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
        finished_at -> Nullable<Timestamptz>,
    }
}
