table! {
    movies (imdb_id) {
        imdb_id -> Varchar,
        kaggle_id -> Int4,
        title -> Varchar,
        original_title -> Nullable<Varchar>,
        tagline -> Nullable<Text>,
        belongs_to_collection -> Nullable<Text>,
        wikipedia_url -> Nullable<Varchar>,
        imdb_link -> Nullable<Varchar>,
        runtime -> Nullable<Float8>,
        budget -> Nullable<Float8>,
        revenue -> Nullable<Float8>,
        release_date -> Nullable<Date>,
        popularity -> Nullable<Float8>,
        vote_average -> Nullable<Float8>,
        vote_count -> Nullable<Int4>,
        genres -> Nullable<Text>,
        original_language -> Nullable<Varchar>,
        overview -> Nullable<Text>,
        spoken_languages -> Nullable<Text>,
        country -> Nullable<Text>,
        production_companies -> Nullable<Text>,
        production_countries -> Nullable<Text>,
        distributor -> Nullable<Text>,
        producers -> Nullable<Text>,
        director -> Nullable<Text>,
        starring -> Nullable<Text>,
        cinematography -> Nullable<Text>,
        editors -> Nullable<Text>,
        writers -> Nullable<Text>,
        composers -> Nullable<Text>,
        based_on -> Nullable<Text>,
        rating_0_5 -> Int8,
        rating_1_0 -> Int8,
        rating_1_5 -> Int8,
        rating_2_0 -> Int8,
        rating_2_5 -> Int8,
        rating_3_0 -> Int8,
        rating_3_5 -> Int8,
        rating_4_0 -> Int8,
        rating_4_5 -> Int8,
        rating_5_0 -> Int8,
    }
}

table! {
    ratings (id) {
        id -> Int4,
        user_id -> Int4,
        movie_id -> Int4,
        rating -> Float8,
        rated_at -> Timestamp,
    }
}

allow_tables_to_appear_in_same_query!(movies, ratings,);
