//! Storage Tests
//!
//! The SeaORM repositories against an in-memory SQLite database with the
//! real migrations applied.

use marketplace_service::contract::*;
use marketplace_service::domain::{NoOpEventPublisher, PagingPolicy, Services};
use marketplace_service::infra::storage::repositories::sea_orm_repositories;
use marketplace_service::MarketplaceModule;
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use uuid::Uuid;

mod common;
use common::{new_line_item, new_ticket, page, print_stage, print_test_header, seller};
use common::StaticCategorySource;

async fn sqlite_services() -> Services {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // one connection, otherwise every pooled connection sees its own empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    MarketplaceModule::migrate(&db).await.unwrap();

    Services::new(
        sea_orm_repositories(Arc::new(db)),
        StaticCategorySource::new(common::office_supplies()),
        Arc::new(NoOpEventPublisher),
        PagingPolicy::default(),
    )
}

async fn admin(services: &Services) -> Uuid {
    let user = services
        .access
        .create_user("Admin", "admin@vega.co.uk")
        .await
        .unwrap();
    services
        .access
        .grant_role(user.id, "Administrators", &[Action::TicketingAdmin], user.id)
        .await
        .unwrap();
    user.id
}

#[tokio::test]
async fn test_permissions_resolve_through_role_tables() {
    let services = sqlite_services().await;
    let admin = admin(&services).await;
    let plain = services
        .access
        .create_user("Plain", "plain@vega.co.uk")
        .await
        .unwrap();

    assert!(services
        .permissions
        .has_permission(admin, Action::TicketComplete)
        .await
        .unwrap());
    assert!(!services
        .permissions
        .has_permission(plain.id, Action::TicketCreate)
        .await
        .unwrap());

    let seeded = services.access.seed_permissions().await.unwrap();
    assert_eq!(seeded.len(), Action::ALL.len());
}

#[tokio::test]
async fn test_unique_user_email_is_enforced() {
    let services = sqlite_services().await;
    services
        .access
        .create_user("Olive", "olive@vega.co.uk")
        .await
        .unwrap();

    let duplicate = services
        .access
        .create_user("Olive again", "olive@vega.co.uk")
        .await;

    assert!(matches!(duplicate, Err(MarketplaceError::Conflict { .. })));
}

#[tokio::test]
async fn test_paginate_sellers_reports_total_record_count() {
    print_test_header(
        "test_paginate_sellers_reports_total_record_count",
        &[
            "A page holds min(pagesize, remaining) rows and every page",
            "reports the size of the whole result set.",
        ],
    );

    let services = sqlite_services().await;
    for i in 0..7 {
        services
            .sellers
            .create(seller(
                &format!("Supplier {}", i),
                &format!("s{}@supply.com", i),
                &format!("+44 {}", i),
            ))
            .await
            .unwrap();
    }

    let first = services
        .sellers
        .paginate(&page("companyName", 1, 5))
        .await
        .unwrap();
    assert_eq!(first.data.len(), 5);
    assert_eq!(first.total_record_count, 7);
    assert_eq!(first.data[0].company_name, "Supplier 0");

    let second = services
        .sellers
        .paginate(&PageRequest {
            sort: SortOrder::Desc,
            ..page("company_name", 2, 5)
        })
        .await
        .unwrap();
    assert_eq!(second.data.len(), 2);
    assert_eq!(second.total_record_count, 7);
    assert_eq!(second.data[1].company_name, "Supplier 0");

    let unknown = services.sellers.paginate(&page("shoeSize", 1, 5)).await;
    assert!(matches!(unknown, Err(MarketplaceError::Validation { .. })));
}

#[tokio::test]
async fn test_seller_filter_and_unique_email() {
    let services = sqlite_services().await;
    let sellers = &services.sellers;
    sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();

    assert_eq!(sellers.filter("ACME").await.unwrap().len(), 1);
    assert_eq!(sellers.filter("").await.unwrap().len(), 1);
    assert_eq!(sellers.filter("globex").await.unwrap().len(), 0);
    assert!(sellers
        .check_company_name("acme office")
        .await
        .unwrap()
        .is_some());

    let duplicate = sellers
        .create(seller("Acme Two", "sales@acme.com", "+44 2"))
        .await;
    assert!(matches!(duplicate, Err(MarketplaceError::Conflict { .. })));
}

#[tokio::test]
async fn test_seller_filter_matches_wildcards_literally() {
    let services = sqlite_services().await;
    let sellers = &services.sellers;
    sellers
        .create(seller("Eezee 100% Supplies", "hello@eezee.sg", "+65 1"))
        .await
        .unwrap();
    sellers
        .create(seller("Acme Widgets", "sales@widgets.com", "+44 3"))
        .await
        .unwrap();

    let percent = sellers.filter("%").await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].company_name, "Eezee 100% Supplies");
    assert!(sellers.filter("_").await.unwrap().is_empty());
    assert_eq!(sellers.filter("0% sup").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_migrations_apply_twice_on_one_connection() {
    print_test_header(
        "test_migrations_apply_twice_on_one_connection",
        &["Re-running the migrator on a migrated database is a no-op."],
    );

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    print_stage("Apply, then apply again");
    MarketplaceModule::migrate(&db).await.unwrap();
    MarketplaceModule::migrate(&db).await.unwrap();

    let services = Services::new(
        sea_orm_repositories(Arc::new(db)),
        StaticCategorySource::new(common::office_supplies()),
        Arc::new(NoOpEventPublisher),
        PagingPolicy::default(),
    );
    admin(&services).await;
    services
        .sellers
        .create(seller("Vega Trading", "ops@vega.co.uk", "+44 9"))
        .await
        .unwrap();
    assert_eq!(services.sellers.filter("vega").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_uom_unique_code_rolls_back_batch() {
    let services = sqlite_services().await;
    let uoms = &services.uoms;
    let new = |code: &str, description: &str| NewUomReference {
        uom_code: code.to_string(),
        description: description.to_string(),
    };

    uoms.create_many(vec![new("PC", "Piece"), new("BOX", "Box")])
        .await
        .unwrap();
    let duplicate = uoms
        .create_many(vec![new("KG", "Kilogram"), new("PC", "Piece again")])
        .await;
    assert!(matches!(duplicate, Err(MarketplaceError::Conflict { .. })));

    let codes: Vec<_> = uoms
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.uom_code)
        .collect();
    assert_eq!(codes, ["BOX", "PC"]);
}

#[tokio::test]
async fn test_category_refresh_upserts_and_logs() {
    let services = sqlite_services().await;
    let categories = &services.categories;

    categories.refresh_from_source().await.unwrap();
    categories.refresh_from_source().await.unwrap();

    assert_eq!(categories.list_main().await.unwrap().len(), 1);
    let subs = categories.filter_sub_categories("").await.unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].title, "Desks");

    let last = categories.last_refresh().await.unwrap().unwrap();
    assert_eq!(last.event_type, EventType::Fetch);
    assert_eq!(last.entity, "categories");
}

#[tokio::test]
async fn test_item_sub_category_links_round_trip() {
    let services = sqlite_services().await;
    let admin = admin(&services).await;
    services.categories.refresh_from_source().await.unwrap();
    let chairs = services
        .categories
        .filter_sub_categories("chairs")
        .await
        .unwrap()
        .remove(0);

    let item = services
        .items
        .create(
            SellerItemFields {
                product_title: "Mesh task chair".to_string(),
                ..Default::default()
            },
            &[chairs.id],
            admin,
        )
        .await
        .unwrap();

    let linked = services.links.sub_categories_of_item(item.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, chairs.id);

    let by_category = services
        .items
        .filter_by(SellerItemSearchField::CategoryTitle, "chair")
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);

    let duplicate = services
        .links
        .link(LinkKind::SellerItemInSubCategory, item.id, chairs.id, admin)
        .await;
    assert!(matches!(duplicate, Err(MarketplaceError::Conflict { .. })));
}

#[tokio::test]
async fn test_label_links_replace_over_sql() {
    let services = sqlite_services().await;
    let admin = admin(&services).await;
    let buyer = services
        .buyers
        .create(
            BuyerOrganisationFields {
                company_name: "Vega Facilities".to_string(),
                ..Default::default()
            },
            admin,
        )
        .await
        .unwrap();
    let ticket = services
        .tickets
        .create(buyer.id, new_ticket("Pantry restock", None), admin)
        .await
        .unwrap();
    let mut labels = Vec::new();
    for title in ["Capex", "Opex", "Urgent"] {
        let label = services
            .labels
            .create(TicketLabelFields {
                title: title.to_string(),
                description: None,
            })
            .await
            .unwrap();
        labels.push(label.id);
    }
    let links = &services.links;

    links
        .link(LinkKind::TicketBodyInLabel, ticket.id, labels[0], admin)
        .await
        .unwrap();
    links
        .set_links(LinkKind::TicketBodyInLabel, ticket.id, &labels[1..], admin)
        .await
        .unwrap();

    let mut titles: Vec<_> = links
        .labels_of_ticket(ticket.id)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();
    titles.sort();
    assert_eq!(titles, ["Opex", "Urgent"]);

    assert!(links
        .unlink(LinkKind::TicketBodyInLabel, ticket.id, labels[2])
        .await
        .unwrap());
    assert_eq!(links.tickets_with_label(labels[1]).await.unwrap().len(), 1);
    assert!(links.tickets_with_label(labels[2]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ticket_flow_over_sql() {
    print_test_header(
        "test_ticket_flow_over_sql",
        &["Ticket, line item and seller item links persist through SQL."],
    );

    let services = sqlite_services().await;
    let admin = admin(&services).await;
    let buyer = services
        .buyers
        .create(
            BuyerOrganisationFields {
                company_name: "Vega Procurement".to_string(),
                ..Default::default()
            },
            admin,
        )
        .await
        .unwrap();

    print_stage("Stage 1: ticket with owner and one line item");
    let ticket = services
        .tickets
        .create(buyer.id, new_ticket("Office refit", Some(admin)), admin)
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Claimed);
    let line_item = services
        .line_items
        .create(ticket.id, new_line_item("Ergonomic chair", Some(admin)), admin)
        .await
        .unwrap();
    let stored = services
        .line_items
        .get_in_ticket(ticket.id, line_item.id)
        .await
        .unwrap();
    assert_eq!(stored.budget_cents, Some(120_000));

    print_stage("Stage 2: source the line item and complete the ticket");
    let offer = services
        .items
        .create(
            SellerItemFields {
                product_title: "Aeron Chair".to_string(),
                ..Default::default()
            },
            &[],
            admin,
        )
        .await
        .unwrap();
    services
        .line_items
        .start_sourcing(line_item.id, admin)
        .await
        .unwrap();
    services
        .links
        .link(LinkKind::SellerItemInLineItem, line_item.id, offer.id, admin)
        .await
        .unwrap();
    services
        .line_items
        .mark_sourced(line_item.id, admin)
        .await
        .unwrap();
    services
        .tickets
        .start_sourcing(ticket.id, admin)
        .await
        .unwrap();
    let completed = services.tickets.complete(ticket.id, admin).await.unwrap();
    assert_eq!(completed.to, TicketStatus::Completed);

    print_stage("Stage 3: deleting the ticket removes its line items");
    assert_eq!(services.tickets.delete_many(&[ticket.id]).await.unwrap(), 1);
    assert!(matches!(
        services.line_items.get(line_item.id).await,
        Err(MarketplaceError::NotFound { .. })
    ));
    assert!(services
        .links
        .line_items_for_seller_item(offer.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_comments_persist_per_target() {
    let services = sqlite_services().await;
    let admin = admin(&services).await;
    let acme = services
        .sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();
    let target = CommentTarget::SellerOrganisation(acme.id);

    let comment = services
        .comments
        .create(target, "Reliable supplier", admin)
        .await
        .unwrap();
    let thread = services.comments.list_for_target(target).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].id, comment.id);
    assert_eq!(thread[0].target, target);

    let removed = services
        .comments
        .update(target, comment.id, "")
        .await
        .unwrap();
    assert_eq!(removed, None);
    assert!(services
        .comments
        .list_for_target(target)
        .await
        .unwrap()
        .is_empty());
}
