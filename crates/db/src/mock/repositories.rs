use chrono::{DateTime, Utc};
use mockall::mock;

use crate::models::{DbAppointment, DbAppointmentWithUser, DbTimeBlock, DbTimeBlockWithCount, DbUser};
use crate::repositories::time_block::TimeBlockFilter;

// Mock repositories for testing
mock! {
    pub TimeBlockRepo {
        pub async fn list_time_blocks(
            &self,
            filter: TimeBlockFilter,
            skip: i64,
            limit: i64,
        ) -> eyre::Result<Vec<DbTimeBlockWithCount>>;

        pub async fn count_time_blocks(
            &self,
            filter: TimeBlockFilter,
        ) -> eyre::Result<i64>;

        pub async fn get_time_block(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbTimeBlockWithCount>>;

        pub async fn create_time_block(
            &self,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> eyre::Result<DbTimeBlock>;

        pub async fn update_time_block(
            &self,
            id: i64,
            start_time: Option<DateTime<Utc>>,
            end_time: Option<DateTime<Utc>>,
        ) -> eyre::Result<DbTimeBlock>;

        pub async fn delete_time_block(&self, id: i64) -> eyre::Result<()>;

        pub async fn find_conflicting(
            &self,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            exclude_id: Option<i64>,
        ) -> eyre::Result<Option<DbTimeBlock>>;

        pub async fn count_total(&self) -> eyre::Result<i64>;

        pub async fn count_occupied(&self) -> eyre::Result<i64>;

        pub async fn list_starting_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbTimeBlockWithCount>>;

        pub async fn list_available_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbTimeBlockWithCount>>;
    }
}

mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            name: &'static str,
            email: &'static str,
            password_hash: &'static str,
            role: &'static str,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_id(&self, id: i64) -> eyre::Result<Option<DbUser>>;

        pub async fn email_exists(&self, email: &'static str) -> eyre::Result<bool>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn create_appointment(
            &self,
            date: DateTime<Utc>,
            user_id: i64,
            time_block_id: i64,
        ) -> eyre::Result<DbAppointment>;

        pub async fn list_for_block(
            &self,
            time_block_id: i64,
        ) -> eyre::Result<Vec<DbAppointmentWithUser>>;

        pub async fn count_for_block(&self, time_block_id: i64) -> eyre::Result<i64>;
    }
}
