use crate::database::{
    model::reservation::{BookedSlotRow, EquipmentLoadRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveTime};
use derive_new::new;
use kernel::model::{
    id::{CourtId, EquipmentId, ReservationId},
    interval::{available_quantity, DatePeriod, TimeSlot},
    reservation::{
        event::{CreateCourtReservation, CreateEquipmentReservation},
        EquipmentAvailability, ReservationClass,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

// SERIALIZABLE トランザクションが直列化失敗（SQLSTATE 40001）で
// 中断された際に、トランザクション全体をやり直す回数の上限。
// やり直し時は検証からやり直すため、競合に負けた要求は
// 500 ではなく競合エラーとして返る
const MAX_SERIALIZATION_RETRIES: usize = 2;

const SERIALIZATION_FAILURE_CODE: &str = "40001";

fn is_serialization_failure(err: &AppError) -> bool {
    let db_err = match err {
        AppError::TransactionError(e) | AppError::SpecificOperationError(e) => {
            e.as_database_error()
        }
        _ => None,
    };
    db_err
        .map(|e| e.code().as_deref() == Some(SERIALIZATION_FAILURE_CODE))
        .unwrap_or(false)
}

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // コート予約を行う
    async fn create_court_reservation(
        &self,
        event: CreateCourtReservation,
    ) -> AppResult<ReservationId> {
        let mut attempts = 0;
        loop {
            match self.try_create_court_reservation(&event).await {
                Err(e) if is_serialization_failure(&e) && attempts < MAX_SERIALIZATION_RETRIES => {
                    attempts += 1;
                    tracing::warn!(
                        court_id = %event.court_id,
                        attempts,
                        "serialization failure, retrying court reservation"
                    );
                }
                other => return other,
            }
        }
    }

    // 機材予約を行う
    async fn create_equipment_reservation(
        &self,
        event: CreateEquipmentReservation,
    ) -> AppResult<ReservationId> {
        let mut attempts = 0;
        loop {
            match self.try_create_equipment_reservation(&event).await {
                Err(e) if is_serialization_failure(&e) && attempts < MAX_SERIALIZATION_RETRIES => {
                    attempts += 1;
                    tracing::warn!(
                        equipment_id = %event.equipment_id,
                        attempts,
                        "serialization failure, retrying equipment reservation"
                    );
                }
                other => return other,
            }
        }
    }

    // 指定日のコートの予約済み時間帯を取得する
    async fn find_booked_slots(
        &self,
        court_id: CourtId,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeSlot>> {
        let court = sqlx::query_as::<_, (CourtId,)>(
            r#"
            SELECT court_id
            FROM courts
            WHERE court_id = $1
            "#,
        )
        .bind(&court_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if court.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "コート（{}）が見つかりませんでした。",
                court_id
            )));
        }

        let slots = sqlx::query_as::<_, BookedSlotRow>(
            r#"
            SELECT start_time, end_time
            FROM court_reservations
            WHERE court_id = $1 AND reserved_on = $2
            ORDER BY start_time ASC
            "#,
        )
        .bind(&court_id)
        .bind(date)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(TimeSlot::from)
        .collect();

        Ok(slots)
    }

    // 指定期間の機材の空き状況を取得する。
    // キャッシュは持たず、呼び出しごとにストアから計算し直す
    async fn find_equipment_availability(
        &self,
        equipment_id: EquipmentId,
        period: DatePeriod,
    ) -> AppResult<EquipmentAvailability> {
        let row = sqlx::query_as::<_, (i32,)>(
            r#"
            SELECT total_quantity
            FROM equipment
            WHERE equipment_id = $1
            "#,
        )
        .bind(&equipment_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((total_quantity,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "機材（{}）が見つかりませんでした。",
                equipment_id
            )));
        };

        let today = Local::now().date_naive();
        let loads: Vec<(DatePeriod, i32)> = sqlx::query_as::<_, EquipmentLoadRow>(
            r#"
            SELECT start_date, return_date, quantity
            FROM equipment_reservations
            WHERE equipment_id = $1 AND return_date >= $2
            "#,
        )
        .bind(&equipment_id)
        .bind(today)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(EquipmentLoadRow::into_period_quantity)
        .collect();

        let available = available_quantity(total_quantity, &loads, &period, today);

        Ok(EquipmentAvailability {
            total_quantity,
            available_quantity: available,
        })
    }

    // 予約を取り消す。コミット済みの予約に対する唯一の変更操作であり、
    // レコードは物理削除する
    async fn cancel(
        &self,
        class: ReservationClass,
        reservation_id: ReservationId,
    ) -> AppResult<()> {
        let table = match class {
            ReservationClass::Court => "court_reservations",
            ReservationClass::Equipment => "equipment_reservations",
        };

        let res = sqlx::query(&format!(
            "DELETE FROM {table} WHERE reservation_id = $1"
        ))
        .bind(&reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                reservation_id
            )));
        }

        Ok(())
    }
}

impl ReservationRepositoryImpl {
    async fn try_create_court_reservation(
        &self,
        event: &CreateCourtReservation,
    ) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定のコート ID をもつコートが存在するか
        // - 存在した場合、希望時間帯が既存予約と重なっていないか
        //
        // 上記の両方が Yes だった場合、このブロック以降の処理に進む
        {
            //
            // ① コートの存在確認 ＋ is_active チェック
            //
            let court_row = sqlx::query_as::<_, (bool,)>(
                r#"
                SELECT is_active
                FROM courts
                WHERE court_id = $1
                "#,
            )
            .bind(&event.court_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some((is_active,)) = court_row else {
                return Err(AppError::EntityNotFound(format!(
                    "コート（{}）が見つかりませんでした。",
                    event.court_id
                )));
            };

            if !is_active {
                return Err(AppError::UnprocessableEntity(format!(
                    "コート（{}）は現在利用できません（is_active = false）",
                    event.court_id
                )));
            }

            //
            // ② 希望時間帯が既存予約と重なっていないか確認
            //    重複条件：
            //        existing.start < new.end AND new.start < existing.end
            //    終端同士が接するだけの予約は重複とみなさない
            //
            let booked: Vec<TimeSlot> = sqlx::query_as::<_, BookedSlotRow>(
                r#"
                SELECT start_time, end_time
                FROM court_reservations
                WHERE court_id = $1 AND reserved_on = $2
                ORDER BY start_time ASC
                "#,
            )
            .bind(&event.court_id)
            .bind(event.reserved_on)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(TimeSlot::from)
            .collect();

            let conflicting: Vec<(NaiveTime, NaiveTime)> = booked
                .iter()
                .filter(|slot| slot.overlaps(&event.slot))
                .map(|slot| (slot.start_time, slot.end_time))
                .collect();

            if !conflicting.is_empty() {
                return Err(AppError::SlotAlreadyReserved { conflicting });
            }
        }

        // チェックを通過したら採番を行い、予約レコードを追加する。
        // 採番もこのトランザクション内で行うため、検証で弾かれた要求が
        // 採番を進めることはない
        let reservation_id = self
            .next_reservation_id(&mut tx, ReservationClass::Court)
            .await?;

        let res = sqlx::query(
            r#"
            INSERT INTO court_reservations
            (reservation_id, court_id, user_id, reserved_on, start_time, end_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&reservation_id)
        .bind(&event.court_id)
        .bind(event.reserved_by)
        .bind(event.reserved_on)
        .bind(event.slot.start_time)
        .bind(event.slot.end_time)
        .bind(event.reserved_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No court reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn try_create_equipment_reservation(
        &self,
        event: &CreateEquipmentReservation,
    ) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の機材 ID をもつ機材が存在するか
        // - 存在した場合、希望期間の空き数量が要求数量以上あるか
        {
            //
            // ① 機材の存在確認 ＋ is_active チェック
            //
            let equipment_row = sqlx::query_as::<_, (bool, i32)>(
                r#"
                SELECT is_active, total_quantity
                FROM equipment
                WHERE equipment_id = $1
                "#,
            )
            .bind(&event.equipment_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some((is_active, total_quantity)) = equipment_row else {
                return Err(AppError::EntityNotFound(format!(
                    "機材（{}）が見つかりませんでした。",
                    event.equipment_id
                )));
            };

            if !is_active {
                return Err(AppError::UnprocessableEntity(format!(
                    "機材（{}）は現在利用できません（is_active = false）",
                    event.equipment_id
                )));
            }

            //
            // ② 希望期間の空き数量を集計し、要求数量と比較する。
            //    期間は両端を含む閉区間で比較し、
            //    返却日が過去の予約は在庫を消費しない
            //
            let today = Local::now().date_naive();
            let loads: Vec<(DatePeriod, i32)> = sqlx::query_as::<_, EquipmentLoadRow>(
                r#"
                SELECT start_date, return_date, quantity
                FROM equipment_reservations
                WHERE equipment_id = $1 AND return_date >= $2
                "#,
            )
            .bind(&event.equipment_id)
            .bind(today)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(EquipmentLoadRow::into_period_quantity)
            .collect();

            let available = available_quantity(total_quantity, &loads, &event.period, today);

            if event.quantity > available {
                // 呼び出し側が要求を修正できるよう、現在の空き数量を返す
                return Err(AppError::InsufficientQuantity { available });
            }
        }

        // チェックを通過したら採番を行い、予約レコードを追加する
        let reservation_id = self
            .next_reservation_id(&mut tx, ReservationClass::Equipment)
            .await?;

        let res = sqlx::query(
            r#"
            INSERT INTO equipment_reservations
            (reservation_id, equipment_id, user_id, start_date, return_date, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&reservation_id)
        .bind(&event.equipment_id)
        .bind(event.reserved_by)
        .bind(event.period.start_date)
        .bind(event.period.end_date)
        .bind(event.quantity)
        .bind(event.reserved_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No equipment reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    // クラスごとの採番を行う。採番行の行ロックにより
    // 同一クラスの割り当ては直列化され、ID は作成順に単調増加する
    async fn next_reservation_id(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        class: ReservationClass,
    ) -> AppResult<ReservationId> {
        let (last_value,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO reservation_sequences (class, last_value)
            VALUES ($1, 1)
            ON CONFLICT (class)
            DO UPDATE SET last_value = reservation_sequences.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(class.sequence_key())
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(class.format_id(last_value))
    }

    // create 系メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
