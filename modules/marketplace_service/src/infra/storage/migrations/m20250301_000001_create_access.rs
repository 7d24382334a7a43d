use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid_pk(Users::Id))
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(timestamp(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;
        unique_index(manager, "idx_users_email", Users::Table, Users::Email).await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(uuid_pk(UserRoles::Id))
                    .col(ColumnDef::new(UserRoles::Name).string().not_null())
                    .col(ColumnDef::new(UserRoles::CreatedBy).uuid().not_null())
                    .col(timestamp(UserRoles::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(uuid_pk(Permissions::Id))
                    .col(ColumnDef::new(Permissions::Value).string().not_null())
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_permissions_value",
            Permissions::Table,
            Permissions::Value,
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRolePermissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRolePermissions::UserRoleId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRolePermissions::PermissionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRolePermissions::LinkedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(timestamp(UserRolePermissions::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(UserRolePermissions::UserRoleId)
                            .col(UserRolePermissions::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_permissions_role")
                            .from(UserRolePermissions::Table, UserRolePermissions::UserRoleId)
                            .to(UserRoles::Table, UserRoles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_permissions_permission")
                            .from(
                                UserRolePermissions::Table,
                                UserRolePermissions::PermissionId,
                            )
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoleUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoleUsers::UserRoleId).uuid().not_null())
                    .col(ColumnDef::new(UserRoleUsers::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserRoleUsers::LinkedBy).uuid().not_null())
                    .col(timestamp(UserRoleUsers::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(UserRoleUsers::UserRoleId)
                            .col(UserRoleUsers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_users_role")
                            .from(UserRoleUsers::Table, UserRoleUsers::UserRoleId)
                            .to(UserRoles::Table, UserRoles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_role_users_user")
                            .from(UserRoleUsers::Table, UserRoleUsers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRoleUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRolePermissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    Id,
    Name,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
    Value,
}

#[derive(DeriveIden)]
enum UserRolePermissions {
    Table,
    UserRoleId,
    PermissionId,
    LinkedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserRoleUsers {
    Table,
    UserRoleId,
    UserId,
    LinkedBy,
    CreatedAt,
}
