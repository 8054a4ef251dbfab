use crate::seed::Seeder;
use crate::seeds::{ADMIN_EMAIL, AGENT_EMAILS, DEMO_PASSWORD, USER_EMAIL};
use db::models::user::{Model, Role};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use sea_orm::{DatabaseConnection, DbErr};
use services::password::{Argon2Hasher, CredentialHasher};

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let hash = Argon2Hasher
            .hash(DEMO_PASSWORD)
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        // Fixed accounts
        Model::insert_if_email_unique(db, "Admin", ADMIN_EMAIL, &hash, Role::Admin).await?;
        for (i, email) in AGENT_EMAILS.iter().enumerate() {
            let name = format!("Agent {}", i + 1);
            Model::insert_if_email_unique(db, &name, email, &hash, Role::Agent).await?;
        }
        Model::insert_if_email_unique(db, "Demo User", USER_EMAIL, &hash, Role::User).await?;

        // Random users
        for _ in 0..5 {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            Model::insert_if_email_unique(db, &name, &email.to_lowercase(), &hash, Role::User)
                .await?;
        }

        Ok(())
    }
}
