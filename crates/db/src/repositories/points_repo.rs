//! Repository for the `student_points` table.
//!
//! Every read joins `users` for the display name, so queries select from a
//! `p` alias (the points row or a CTE over it) left-joined to `users u`.

use sqlx::PgPool;
use tahfidz_core::points::PointsDelta;
use tahfidz_core::types::DbId;

use crate::models::points::StudentPointsRow;

/// Column list for the joined points/profile projection.
const COLUMNS: &str = "p.student_id, p.organization_id, p.total_points, \
                       p.hafalan_points, p.quiz_points, u.name AS display_name";

/// Insert-or-touch used by [`PointsRepo::insert_if_absent`] and
/// [`PointsRepo::enroll`]. The no-op update makes `RETURNING` yield the
/// existing row on conflict.
const UPSERT_CTE: &str = "WITH p AS ( \
     INSERT INTO student_points (student_id, organization_id) VALUES ($1, $2) \
     ON CONFLICT ON CONSTRAINT uq_student_points_student_org \
     DO UPDATE SET student_id = student_points.student_id \
     RETURNING * \
 )";

pub struct PointsRepo;

impl PointsRepo {
    /// All points rows of an organization, highest total first.
    ///
    /// Ties are broken by student id so the order is stable across reads.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<StudentPointsRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM student_points p \
             LEFT JOIN users u ON u.id = p.student_id \
             WHERE p.organization_id = $1 \
             ORDER BY p.total_points DESC, p.student_id ASC"
        );
        sqlx::query_as::<_, StudentPointsRow>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<StudentPointsRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM student_points p \
             LEFT JOIN users u ON u.id = p.student_id \
             WHERE p.student_id = $1 AND p.organization_id = $2"
        );
        sqlx::query_as::<_, StudentPointsRow>(&query)
            .bind(student_id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a zeroed row unless one exists; returns the stored row.
    pub async fn insert_if_absent(
        pool: &PgPool,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<StudentPointsRow, sqlx::Error> {
        let query = format!(
            "{UPSERT_CTE} SELECT {COLUMNS} FROM p LEFT JOIN users u ON u.id = p.student_id"
        );
        sqlx::query_as::<_, StudentPointsRow>(&query)
            .bind(student_id)
            .bind(organization_id)
            .fetch_one(pool)
            .await
    }

    /// Atomically add `delta` to a row. Returns `None` if the row is missing.
    pub async fn increment(
        pool: &PgPool,
        student_id: DbId,
        organization_id: DbId,
        delta: PointsDelta,
    ) -> Result<Option<StudentPointsRow>, sqlx::Error> {
        let query = format!(
            "WITH p AS ( \
                 UPDATE student_points SET \
                     hafalan_points = hafalan_points + $3, \
                     quiz_points = quiz_points + $4, \
                     total_points = total_points + $3 + $4 \
                 WHERE student_id = $1 AND organization_id = $2 \
                 RETURNING * \
             ) \
             SELECT {COLUMNS} FROM p LEFT JOIN users u ON u.id = p.student_id"
        );
        sqlx::query_as::<_, StudentPointsRow>(&query)
            .bind(student_id)
            .bind(organization_id)
            .bind(delta.hafalan)
            .bind(delta.quiz)
            .fetch_optional(pool)
            .await
    }

    /// Record membership and ensure the points row in one transaction.
    ///
    /// Returns `None` (and rolls back) if the user belongs to a different
    /// organization or does not exist.
    pub async fn enroll(
        pool: &PgPool,
        student_id: DbId,
        organization_id: DbId,
    ) -> Result<Option<StudentPointsRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE users SET organization_id = $2 \
             WHERE id = $1 AND (organization_id IS NULL OR organization_id = $2)",
        )
        .bind(student_id)
        .bind(organization_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "{UPSERT_CTE} SELECT {COLUMNS} FROM p LEFT JOIN users u ON u.id = p.student_id"
        );
        let row = sqlx::query_as::<_, StudentPointsRow>(&query)
            .bind(student_id)
            .bind(organization_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }
}
