use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string(User::Login).primary_key())
                    .col(string(User::HashedPassword))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(string_uniq(Film::Name))
                    .col(integer_null(Film::ReleaseYear))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(pk_auto(Review::Id))
                    .col(string(Review::Login))
                    .col(string(Review::FilmName))
                    .col(string_null(Review::Text))
                    .col(integer(Review::Mark).check(Expr::col(Review::Mark).between(0, 10)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_login")
                            .from(Review::Table, Review::Login)
                            .to(User::Table, User::Login)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_film_name")
                            .from(Review::Table, Review::FilmName)
                            .to(Film::Table, Film::Name)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_unique")
                    .table(Review::Table)
                    .col(Review::Login)
                    .col(Review::FilmName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_film_name")
                    .table(Review::Table)
                    .col(Review::FilmName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Login,
    HashedPassword,
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Id,
    Name,
    ReleaseYear,
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    Login,
    FilmName,
    Text,
    Mark,
}
