use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    spycats_db::health_check(&pool).await.unwrap();

    for table in ["spy_cats", "missions", "targets"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The schema rejects values the API would also reject.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_constraints(pool: PgPool) {
    let negative_salary = sqlx::query(
        "INSERT INTO spy_cats (name, years_of_experience, breed, salary)
         VALUES ('Tom', 1, 'Persian', -1)",
    )
    .execute(&pool)
    .await;
    assert!(negative_salary.is_err());

    let negative_years = sqlx::query(
        "INSERT INTO spy_cats (name, years_of_experience, breed, salary)
         VALUES ('Tom', -1, 'Persian', 1)",
    )
    .execute(&pool)
    .await;
    assert!(negative_years.is_err());
}
