//! Catalog Tests
//!
//! Seller items, the category taxonomy refresh, labels and comment threads.

use marketplace_service::contract::*;
use uuid::Uuid;

mod common;
use common::{office_supplies, page, print_stage, print_test_header, seller, TestEnv};

async fn refreshed_sub(env: &TestEnv, title: &str) -> SubCategory {
    env.services.categories.refresh_from_source().await.unwrap();
    env.services
        .categories
        .filter_sub_categories(title)
        .await
        .unwrap()
        .into_iter()
        .next()
        .unwrap()
}

#[tokio::test]
async fn test_refresh_upserts_by_external_id_and_logs_fetch() {
    print_test_header(
        "test_refresh_upserts_by_external_id_and_logs_fetch",
        &[
            "Refreshing twice keeps one row per external id, picks up renamed",
            "titles and records a FETCH event each time.",
        ],
    );

    let env = TestEnv::new();
    let categories = &env.services.categories;
    assert_eq!(categories.last_refresh().await.unwrap(), None);

    print_stage("Stage 1: initial refresh");
    let summary = categories.refresh_from_source().await.unwrap();
    assert_eq!(summary.main_categories, 1);
    assert_eq!(summary.sub_categories, 2);
    let first_event = categories.last_refresh().await.unwrap().unwrap();
    assert_eq!(first_event.event_type, EventType::Fetch);
    assert_eq!(first_event.entity, "categories");

    print_stage("Stage 2: source renames a sub-category");
    let mut renamed = office_supplies();
    renamed[0].sub_categories[1].title = "Standing Desks".to_string();
    env.source.replace(renamed);
    categories.refresh_from_source().await.unwrap();

    let mains = categories.list_main().await.unwrap();
    assert_eq!(mains.len(), 1);
    assert_eq!(mains[0].title, "Office Supplies");
    let subs = categories.filter_sub_categories("desk").await.unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].title, "Standing Desks");
    assert_eq!(subs[0].main_category_id, mains[0].id);

    let latest = categories.last_refresh().await.unwrap().unwrap();
    assert!(latest.created_at >= first_event.created_at);

    let page = categories
        .paginate_sub_categories(&page("title", 1, 1))
        .await
        .unwrap();
    assert_eq!(page.total_record_count, 2);
    assert_eq!(page.data[0].title, "Office Chairs");
}

#[tokio::test]
async fn test_delete_all_categories() {
    let env = TestEnv::new();
    let categories = &env.services.categories;
    categories.refresh_from_source().await.unwrap();

    let deleted = categories.delete_all().await.unwrap();

    assert_eq!(deleted, 3);
    assert!(categories.list_main().await.unwrap().is_empty());
    assert!(matches!(
        categories.get_sub_category(Uuid::new_v4()).await,
        Err(MarketplaceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_create_item_links_sub_categories() {
    let env = TestEnv::new();
    let admin = env.admin().await;
    let chairs = refreshed_sub(&env, "chairs").await;
    let acme = env
        .services
        .sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();

    let item = env
        .services
        .items
        .create(
            SellerItemFields {
                seller_organisation_id: Some(acme.id),
                product_title: "Mesh task chair".to_string(),
                brand_model: Some("Steelcase".to_string()),
                ..Default::default()
            },
            &[chairs.id],
            admin,
        )
        .await
        .unwrap();

    let linked = env
        .services
        .links
        .sub_categories_of_item(item.id)
        .await
        .unwrap();
    assert_eq!(linked, vec![chairs.clone()]);
    let in_sub = env
        .services
        .links
        .items_in_sub_category(chairs.id)
        .await
        .unwrap();
    assert_eq!(in_sub, vec![item.clone()]);

    let items = &env.services.items;
    assert_eq!(
        items
            .filter_by(SellerItemSearchField::CategoryTitle, "office ch")
            .await
            .unwrap(),
        vec![item.clone()]
    );
    assert_eq!(
        items
            .filter_by(SellerItemSearchField::SellerOrganisation, "acme")
            .await
            .unwrap(),
        vec![item.clone()]
    );
    assert!(items
        .filter_by(SellerItemSearchField::BrandModel, "herman")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_create_item_rejects_unknown_references() {
    let env = TestEnv::new();
    let admin = env.admin().await;
    let items = &env.services.items;

    let unknown_sub = items
        .create(
            SellerItemFields {
                product_title: "Desk lamp".to_string(),
                ..Default::default()
            },
            &[Uuid::new_v4()],
            admin,
        )
        .await;
    match unknown_sub {
        Err(MarketplaceError::NotFound { resource, .. }) => assert_eq!(resource, "sub_category"),
        other => panic!("Expected NotFound, got {:?}", other),
    }

    let unknown_org = items
        .create(
            SellerItemFields {
                seller_organisation_id: Some(Uuid::new_v4()),
                product_title: "Desk lamp".to_string(),
                ..Default::default()
            },
            &[],
            admin,
        )
        .await;
    assert!(matches!(unknown_org, Err(MarketplaceError::NotFound { .. })));

    let blank = items
        .create(SellerItemFields::default(), &[], admin)
        .await;
    assert!(matches!(blank, Err(MarketplaceError::Validation { .. })));
}

#[tokio::test]
async fn test_item_filter_paginate_and_status() {
    let env = TestEnv::new();
    let admin = env.admin().await;
    let items = &env.services.items;
    for title in ["Whiteboard", "Wall clock", "Waste bin", "Letter tray"] {
        items
            .create(
                SellerItemFields {
                    product_title: title.to_string(),
                    model_number: Some(format!("{}-01", &title[..2])),
                    ..Default::default()
                },
                &[],
                admin,
            )
            .await
            .unwrap();
    }

    assert_eq!(items.filter("w").await.unwrap().len(), 3);
    assert_eq!(items.filter("").await.unwrap().len(), 4);
    assert_eq!(
        items
            .filter_by(SellerItemSearchField::ModelNumber, "le-01")
            .await
            .unwrap()
            .len(),
        1
    );

    let page = items.paginate(&page("product_title", 1, 3)).await.unwrap();
    assert_eq!(page.total_record_count, 4);
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.data[0].product_title, "Letter tray");

    let item = page.data[0].clone();
    let inactive = items
        .set_status(item.id, LifecycleStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(inactive.status, LifecycleStatus::Inactive);

    assert_eq!(items.delete_many(&[item.id]).await.unwrap(), 1);
    assert_eq!(items.filter("").await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_labels_crud() {
    let env = TestEnv::new();
    let labels = &env.services.labels;

    let label = labels
        .create(TicketLabelFields {
            title: "Capex".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let updated = labels
        .update(
            label.id,
            TicketLabelFields {
                title: "Capital expenditure".to_string(),
                description: Some("Needs finance sign-off".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, label.id);
    assert_eq!(labels.get(label.id).await.unwrap().title, "Capital expenditure");
    assert_eq!(labels.list().await.unwrap().len(), 1);
    assert!(matches!(
        labels.create(TicketLabelFields::default()).await,
        Err(MarketplaceError::Validation { .. })
    ));
}

fn uom(code: &str, description: &str) -> NewUomReference {
    NewUomReference {
        uom_code: code.to_string(),
        description: description.to_string(),
    }
}

#[tokio::test]
async fn test_uom_bulk_create_and_list() {
    print_test_header(
        "test_uom_bulk_create_and_list",
        &[
            "Units are created as a batch and listed by code;",
            "a bad or duplicate code rejects the whole batch.",
        ],
    );

    let env = TestEnv::new();
    let uoms = &env.services.uoms;

    print_stage("Create two units");
    let created = uoms
        .create_many(vec![uom(" SGL ", "Single"), uom("BOX", "Box of 10")])
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].uom_code, "SGL");

    let listed = uoms.list().await.unwrap();
    let codes: Vec<_> = listed.iter().map(|u| u.uom_code.as_str()).collect();
    assert_eq!(codes, ["BOX", "SGL"]);

    print_stage("Rejected batches leave the list unchanged");
    assert!(matches!(
        uoms.create_many(vec![uom("YD", "Yard"), uom("YD", "Yard again")]).await,
        Err(MarketplaceError::Conflict { .. })
    ));
    assert!(matches!(
        uoms.create_many(vec![uom("YD", "Yard"), uom("BOX", "Another box")]).await,
        Err(MarketplaceError::Conflict { .. })
    ));
    assert!(matches!(
        uoms.create_many(vec![uom("YD", " ")]).await,
        Err(MarketplaceError::Validation { .. })
    ));
    assert!(matches!(
        uoms.create_many(Vec::new()).await,
        Err(MarketplaceError::Validation { .. })
    ));
    assert_eq!(uoms.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_comment_threads_are_scoped_to_their_target() {
    let env = TestEnv::new();
    let admin = env.admin().await;
    let buyer = env.buyer(admin).await;
    let ticket = env.ticket(buyer, None, admin).await;
    let line_item = env.line_item(ticket.id, None, admin).await;
    let comments = &env.services.comments;

    let on_ticket = comments
        .create(CommentTarget::TicketBody(ticket.id), "Need by Friday", admin)
        .await
        .unwrap();
    comments
        .create(CommentTarget::LineItem(line_item.id), "Black only", admin)
        .await
        .unwrap();

    let thread = comments
        .list_for_target(CommentTarget::TicketBody(ticket.id))
        .await
        .unwrap();
    assert_eq!(thread, vec![on_ticket.clone()]);

    let wrong_target = comments
        .get(CommentTarget::LineItem(line_item.id), on_ticket.id)
        .await;
    assert!(matches!(wrong_target, Err(MarketplaceError::NotFound { .. })));

    let missing = comments
        .create(CommentTarget::TicketBody(Uuid::new_v4()), "Hello", admin)
        .await;
    assert!(matches!(missing, Err(MarketplaceError::NotFound { .. })));
}

#[tokio::test]
async fn test_blank_update_deletes_only_seller_comments() {
    print_test_header(
        "test_blank_update_deletes_only_seller_comments",
        &[
            "Blanking a seller organisation comment removes it;",
            "blanking a ticket comment is rejected.",
        ],
    );

    let env = TestEnv::new();
    let admin = env.admin().await;
    let buyer = env.buyer(admin).await;
    let ticket = env.ticket(buyer, None, admin).await;
    let acme = env
        .services
        .sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();
    let comments = &env.services.comments;
    let seller_target = CommentTarget::SellerOrganisation(acme.id);
    let ticket_target = CommentTarget::TicketBody(ticket.id);

    let seller_note = comments
        .create(seller_target, "Slow to reply", admin)
        .await
        .unwrap();
    let ticket_note = comments
        .create(ticket_target, "Awaiting quote", admin)
        .await
        .unwrap();

    let edited = comments
        .update(seller_target, seller_note.id, "Replies within a day")
        .await
        .unwrap();
    assert_eq!(
        edited.map(|c| c.message),
        Some("Replies within a day".to_string())
    );

    let removed = comments
        .update(seller_target, seller_note.id, "  ")
        .await
        .unwrap();
    assert_eq!(removed, None);
    assert!(comments
        .list_for_target(seller_target)
        .await
        .unwrap()
        .is_empty());

    let rejected = comments.update(ticket_target, ticket_note.id, "").await;
    assert!(matches!(rejected, Err(MarketplaceError::Validation { .. })));

    comments.delete(ticket_target, ticket_note.id).await.unwrap();
    assert!(matches!(
        comments.get(ticket_target, ticket_note.id).await,
        Err(MarketplaceError::NotFound { .. })
    ));
}
