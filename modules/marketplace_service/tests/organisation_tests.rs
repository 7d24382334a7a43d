//! Organisation Tests
//!
//! Buyer and seller organisations, seller contacts, branches, payment terms
//! and the uniqueness checks.

use marketplace_service::contract::*;
use marketplace_service::domain::service::sellers::{
    COMPANY_NAME_EXISTS, EMAIL_EXISTS, PHONE_EXISTS,
};
use uuid::Uuid;

mod common;
use common::{page, print_stage, print_test_header, seller, TestEnv};

fn contact(name: &str, email: &str, phone: &str) -> SellerContactFields {
    SellerContactFields {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        department: Some("Sales".to_string()),
        role: None,
    }
}

#[tokio::test]
async fn test_company_checks_report_existing_values() {
    print_test_header(
        "test_company_checks_report_existing_values",
        &[
            "Checks answer a fixed message when the value is taken",
            "and nothing when it is free or the search is blank.",
        ],
    );

    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 20 7946 0000"))
        .await
        .unwrap();

    assert_eq!(
        sellers.check_company_email("SALES@acme.com").await.unwrap(),
        Some(EMAIL_EXISTS)
    );
    assert_eq!(
        sellers.check_company_phone("+44 20 7946 0000").await.unwrap(),
        Some(PHONE_EXISTS)
    );
    assert_eq!(
        sellers.check_company_name("acme office").await.unwrap(),
        Some(COMPANY_NAME_EXISTS)
    );
    assert_eq!(sellers.check_company_email("other@acme.com").await.unwrap(), None);
    assert_eq!(sellers.check_company_name("  ").await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_company_email_conflicts() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();

    let duplicate = sellers
        .create(seller("Acme Two", "sales@acme.com", "+44 2"))
        .await;

    assert!(matches!(duplicate, Err(MarketplaceError::Conflict { .. })));
    assert_eq!(sellers.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_seller_validates_basic_information() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;

    for invalid in [
        seller("", "sales@acme.com", "+44 1"),
        seller("Acme", "not-an-email", "+44 1"),
        seller("Acme", "sales@acme.com", ""),
    ] {
        let result = sellers.create(invalid).await;
        assert!(matches!(result, Err(MarketplaceError::Validation { .. })));
    }
}

#[tokio::test]
async fn test_create_seller_with_nested_records() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    let mut new_org = seller("Acme Office", "sales@acme.com", "+44 1");
    new_org.contacts = vec![contact("Dana", "dana@acme.com", "+44 11")];
    new_org.branch_locations = vec![SellerBranchLocationFields {
        branch_name: "Leeds".to_string(),
        branch_address: "1 Wellington St".to_string(),
    }];

    let org = sellers.create(new_org).await.unwrap();

    assert_eq!(org.status, LifecycleStatus::Active);
    let contacts = sellers.filter_contacts(org.id, "").await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].seller_organisation_id, org.id);
    let branches = sellers.filter_branches(org.id, "leeds").await.unwrap();
    assert_eq!(branches.len(), 1);
}

#[tokio::test]
async fn test_status_is_freely_settable() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    let org = sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();

    for status in [
        LifecycleStatus::Deleted,
        LifecycleStatus::Active,
        LifecycleStatus::Inactive,
    ] {
        let updated = sellers.set_status(org.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }
}

#[tokio::test]
async fn test_filter_and_paginate_organisations() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    for i in 0..7 {
        sellers
            .create(seller(
                &format!("Supplier {}", i),
                &format!("s{}@supply.com", i),
                &format!("+44 {}", i),
            ))
            .await
            .unwrap();
    }

    assert_eq!(sellers.filter("SUPPLIER").await.unwrap().len(), 7);
    assert_eq!(sellers.filter("s3@").await.unwrap().len(), 1);

    let first = sellers
        .paginate(&page("companyName", 1, 5))
        .await
        .unwrap();
    assert_eq!(first.total_record_count, 7);
    assert_eq!(first.data.len(), 5);
    assert_eq!(first.data[0].company_name, "Supplier 0");

    let second = sellers
        .paginate(&page("companyName", 2, 5))
        .await
        .unwrap();
    assert_eq!(second.data.len(), 2);
    assert_eq!(second.data[1].company_name, "Supplier 6");

    let bad_page = sellers.paginate(&page("companyName", 0, 5)).await;
    assert!(matches!(bad_page, Err(MarketplaceError::Validation { .. })));
    let too_large = sellers.paginate(&page("companyName", 1, 500)).await;
    assert!(matches!(too_large, Err(MarketplaceError::Validation { .. })));
    let bad_column = sellers.paginate(&page("shoeSize", 1, 5)).await;
    assert!(matches!(bad_column, Err(MarketplaceError::Validation { .. })));
}

#[tokio::test]
async fn test_contacts_belong_to_their_organisation() {
    print_test_header(
        "test_contacts_belong_to_their_organisation",
        &["Contacts are addressed through their owning organisation."],
    );

    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    let acme = sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();
    let other = sellers
        .create(seller("Globex", "sales@globex.com", "+44 2"))
        .await
        .unwrap();

    print_stage("Stage 1: create contact under Acme");
    let dana = sellers
        .create_contact(acme.id, contact("Dana", "dana@acme.com", "+44 11"))
        .await
        .unwrap();

    print_stage("Stage 2: the contact is invisible through Globex");
    let foreign = sellers.get_contact(other.id, dana.id).await;
    assert!(matches!(foreign, Err(MarketplaceError::NotFound { .. })));

    print_stage("Stage 3: duplicate contact email conflicts, checks report it");
    let duplicate = sellers
        .create_contact(acme.id, contact("Dan", "dana@acme.com", "+44 12"))
        .await;
    assert!(matches!(duplicate, Err(MarketplaceError::Conflict { .. })));
    assert_eq!(
        sellers.check_contact_email("dana@acme.com").await.unwrap(),
        Some(EMAIL_EXISTS)
    );
    assert_eq!(
        sellers.check_contact_phone("+44 11").await.unwrap(),
        Some(PHONE_EXISTS)
    );

    let missing_org = sellers
        .create_contact(Uuid::new_v4(), contact("Eve", "eve@acme.com", "+44 13"))
        .await;
    assert!(matches!(missing_org, Err(MarketplaceError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_contact_and_branch() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    let acme = sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();
    let dana = sellers
        .create_contact(acme.id, contact("Dana", "dana@acme.com", "+44 11"))
        .await
        .unwrap();
    let branch = sellers
        .create_branch(
            acme.id,
            SellerBranchLocationFields {
                branch_name: "Leeds".to_string(),
                branch_address: "1 Wellington St".to_string(),
            },
        )
        .await
        .unwrap();

    let renamed = sellers
        .update_contact(acme.id, dana.id, contact("Dana Scully", "dana@acme.com", "+44 11"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Dana Scully");

    let inactive = sellers
        .set_branch_status(acme.id, branch.id, LifecycleStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(inactive.status, LifecycleStatus::Inactive);

    let branches = sellers
        .paginate_branches(acme.id, &page("branch_name", 1, 10))
        .await
        .unwrap();
    assert_eq!(branches.total_record_count, 1);
}

#[tokio::test]
async fn test_payment_term_is_unique_per_organisation() {
    let env = TestEnv::new();
    let sellers = &env.services.sellers;
    let acme = sellers
        .create(seller("Acme Office", "sales@acme.com", "+44 1"))
        .await
        .unwrap();
    let fields = SellerPaymentTermFields {
        payment_method: "Bank transfer".to_string(),
        bank_name: Some("Northern Bank".to_string()),
        bank_account_holder: Some("Acme Office Ltd".to_string()),
        bank_account_number: Some("12345678".to_string()),
    };

    let term = sellers
        .create_payment_term(acme.id, fields.clone())
        .await
        .unwrap();
    assert_eq!(term.seller_organisation_id, acme.id);

    let second = sellers.create_payment_term(acme.id, fields.clone()).await;
    assert!(matches!(second, Err(MarketplaceError::Conflict { .. })));

    let unknown = sellers.create_payment_term(Uuid::new_v4(), fields).await;
    assert!(matches!(unknown, Err(MarketplaceError::NotFound { .. })));

    let updated = sellers
        .update_payment_term(
            acme.id,
            SellerPaymentTermFields {
                payment_method: "Card".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, term.id);
    assert_eq!(updated.payment_method, "Card");
    assert_eq!(updated.bank_account_number, None);
}

#[tokio::test]
async fn test_buyer_organisation_lifecycle() {
    let env = TestEnv::new();
    let admin = env.admin().await;
    let buyers = &env.services.buyers;

    let buyer = buyers
        .create(
            BuyerOrganisationFields {
                company_name: "Vega Procurement".to_string(),
                company_email: Some("buying@vega.co.uk".to_string()),
                ..Default::default()
            },
            admin,
        )
        .await
        .unwrap();
    assert_eq!(buyer.created_by, admin);
    assert_eq!(buyers.get(buyer.id).await.unwrap(), buyer);

    let invalid = buyers
        .create(
            BuyerOrganisationFields {
                company_name: "Broken".to_string(),
                company_email: Some("broken".to_string()),
                ..Default::default()
            },
            admin,
        )
        .await;
    assert!(matches!(invalid, Err(MarketplaceError::Validation { .. })));

    assert_eq!(buyers.delete_many(&[buyer.id]).await.unwrap(), 1);
    assert!(buyers.list().await.unwrap().is_empty());
}
