// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::ratings;
use chrono::NaiveDateTime;
use records::Rating;

// To insert a new rating into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "ratings"]
pub struct NewRating {
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: f64,
    pub rated_at: NaiveDateTime,
}

impl From<&Rating> for NewRating {
    fn from(rating: &Rating) -> Self {
        Self {
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            rating: rating.rating,
            rated_at: rating.rated_at,
        }
    }
}
