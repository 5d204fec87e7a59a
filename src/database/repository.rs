//! Row-level CRUD for the two entity tables.
//!
//! Not-found is expressed as `Option`, never as an error; callers decide what
//! a miss means. Each method is a single statement, so atomicity comes from
//! the database itself. Failures surface as `sqlx::Error` and the handler
//! layer maps them to the error taxonomy.

use sqlx::PgPool;

use crate::database::models::{Actor, Movie};

pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn select_all(&self) -> Result<Vec<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>("SELECT id, title, release_date FROM movies ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn select_by_id(&self, id: i32) -> Result<Option<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>("SELECT id, title, release_date FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(
        &self,
        title: &str,
        release_date: Option<&str>,
    ) -> Result<Movie, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, release_date) VALUES ($1, $2)
             RETURNING id, title, release_date",
        )
        .bind(title)
        .bind(release_date)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(&self, movie: &Movie) -> Result<Movie, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET title = $2, release_date = $3 WHERE id = $1
             RETURNING id, title, release_date",
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.release_date)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

pub struct ActorRepository {
    pool: PgPool,
}

impl ActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn select_all(&self) -> Result<Vec<Actor>, sqlx::Error> {
        sqlx::query_as::<_, Actor>("SELECT id, name, gender, age FROM actors ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn select_by_id(&self, id: i32) -> Result<Option<Actor>, sqlx::Error> {
        sqlx::query_as::<_, Actor>("SELECT id, name, gender, age FROM actors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(
        &self,
        name: &str,
        gender: Option<&str>,
        age: Option<i32>,
    ) -> Result<Actor, sqlx::Error> {
        sqlx::query_as::<_, Actor>(
            "INSERT INTO actors (name, gender, age) VALUES ($1, $2, $3)
             RETURNING id, name, gender, age",
        )
        .bind(name)
        .bind(gender)
        .bind(age)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(&self, actor: &Actor) -> Result<Actor, sqlx::Error> {
        sqlx::query_as::<_, Actor>(
            "UPDATE actors SET name = $2, gender = $3, age = $4 WHERE id = $1
             RETURNING id, name, gender, age",
        )
        .bind(actor.id)
        .bind(&actor.name)
        .bind(&actor.gender)
        .bind(actor.age)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
