//! Buyer and seller organisations with their contacts, branches and payment
//! terms

use super::{deleted_json, list_json, page_json, to_page_request, ApiResult, Settings};
use crate::api::rest::dto::*;
use crate::api::rest::extract::{ActingUser, Payload, ValidQuery};
use crate::api::rest::mapper::lifecycle_segment;
use crate::domain::Services;
use axum::{extract::Path, Extension, Json};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Uniqueness check body: `{"<field>": "<Field> already exists"}` or JSON `null`
pub type TakenDto = Option<BTreeMap<&'static str, &'static str>>;

fn taken(field: &'static str, message: Option<&'static str>) -> TakenDto {
    message.map(|m| BTreeMap::from([(field, m)]))
}

// ===== Buyer organisations =====

pub async fn create_buyer(
    Extension(services): Extension<Services>,
    ActingUser(acting_user): ActingUser,
    Payload(req): Payload<BuyerOrganisationRequest>,
) -> ApiResult<BuyerOrganisationDto> {
    let org = services.buyers.create(req.into(), acting_user).await?;
    Ok(Json(org.into()))
}

pub async fn list_buyers(
    Extension(services): Extension<Services>,
) -> ApiResult<Vec<BuyerOrganisationDto>> {
    list_json(services.buyers.list().await?)
}

pub async fn get_buyer(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<BuyerOrganisationDto> {
    Ok(Json(services.buyers.get(id).await?.into()))
}

pub async fn delete_buyers(
    Extension(services): Extension<Services>,
    Payload(req): Payload<DeleteManyRequest>,
) -> ApiResult<DeletedDto> {
    deleted_json(services.buyers.delete_many(&req.ids).await)
}

// ===== Seller organisations =====

pub async fn create_seller(
    Extension(services): Extension<Services>,
    Payload(req): Payload<CreateSellerOrganisationRequest>,
) -> ApiResult<SellerOrganisationDto> {
    Ok(Json(services.sellers.create(req.into()).await?.into()))
}

pub async fn list_sellers(
    Extension(services): Extension<Services>,
) -> ApiResult<Vec<SellerOrganisationDto>> {
    list_json(services.sellers.list().await?)
}

pub async fn get_seller(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
) -> ApiResult<SellerOrganisationDto> {
    Ok(Json(services.sellers.get(id).await?.into()))
}

pub async fn filter_sellers(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<SellerOrganisationDto>> {
    list_json(services.sellers.filter(&query.search).await?)
}

pub async fn paginate_sellers(
    Extension(services): Extension<Services>,
    Extension(settings): Settings,
    ValidQuery(query): ValidQuery<PaginateQuery>,
) -> ApiResult<PageDto<SellerOrganisationDto>> {
    let request = to_page_request(&settings, query)?;
    page_json(services.sellers.paginate(&request).await?)
}

pub async fn update_seller_basic_information(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
    Payload(req): Payload<SellerBasicInformationRequest>,
) -> ApiResult<SellerOrganisationDto> {
    let org = services
        .sellers
        .update_basic_information(id, req.into())
        .await?;
    Ok(Json(org.into()))
}

pub async fn update_seller_details_information(
    Extension(services): Extension<Services>,
    Path(id): Path<Uuid>,
    Payload(req): Payload<SellerDetailsInformationRequest>,
) -> ApiResult<SellerOrganisationDto> {
    let org = services
        .sellers
        .update_details_information(id, req.into())
        .await?;
    Ok(Json(org.into()))
}

pub async fn set_seller_status(
    Extension(services): Extension<Services>,
    Path(status): Path<String>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<SellerOrganisationDto> {
    let status = lifecycle_segment(&status)?;
    Ok(Json(services.sellers.set_status(req.id, status).await?.into()))
}

pub async fn delete_sellers(
    Extension(services): Extension<Services>,
    Payload(req): Payload<DeleteManyRequest>,
) -> ApiResult<DeletedDto> {
    deleted_json(services.sellers.delete_many(&req.ids).await)
}

pub async fn check_company_email(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<TakenDto> {
    let message = services.sellers.check_company_email(&query.search).await?;
    Ok(Json(taken("companyEmail", message)))
}

pub async fn check_company_phone(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<TakenDto> {
    let message = services.sellers.check_company_phone(&query.search).await?;
    Ok(Json(taken("companyPhone", message)))
}

pub async fn check_company_name(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<TakenDto> {
    let message = services.sellers.check_company_name(&query.search).await?;
    Ok(Json(taken("companyName", message)))
}

// ===== Seller contacts =====

pub async fn create_contact(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
    Payload(req): Payload<SellerContactRequest>,
) -> ApiResult<SellerContactDto> {
    let contact = services.sellers.create_contact(org_id, req.into()).await?;
    Ok(Json(contact.into()))
}

pub async fn list_contacts(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
) -> ApiResult<Vec<SellerContactDto>> {
    list_json(services.sellers.filter_contacts(org_id, "").await?)
}

pub async fn get_contact(
    Extension(services): Extension<Services>,
    Path((org_id, contact_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<SellerContactDto> {
    Ok(Json(services.sellers.get_contact(org_id, contact_id).await?.into()))
}

pub async fn update_contact(
    Extension(services): Extension<Services>,
    Path((org_id, contact_id)): Path<(Uuid, Uuid)>,
    Payload(req): Payload<SellerContactRequest>,
) -> ApiResult<SellerContactDto> {
    let contact = services
        .sellers
        .update_contact(org_id, contact_id, req.into())
        .await?;
    Ok(Json(contact.into()))
}

pub async fn set_contact_status(
    Extension(services): Extension<Services>,
    Path((org_id, status)): Path<(Uuid, String)>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<SellerContactDto> {
    let status = lifecycle_segment(&status)?;
    let contact = services
        .sellers
        .set_contact_status(org_id, req.id, status)
        .await?;
    Ok(Json(contact.into()))
}

pub async fn filter_contacts(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<SellerContactDto>> {
    list_json(services.sellers.filter_contacts(org_id, &query.search).await?)
}

pub async fn paginate_contacts(
    Extension(services): Extension<Services>,
    Extension(settings): Settings,
    Path(org_id): Path<Uuid>,
    ValidQuery(query): ValidQuery<PaginateQuery>,
) -> ApiResult<PageDto<SellerContactDto>> {
    let request = to_page_request(&settings, query)?;
    page_json(services.sellers.paginate_contacts(org_id, &request).await?)
}

pub async fn check_contact_email(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<TakenDto> {
    let message = services.sellers.check_contact_email(&query.search).await?;
    Ok(Json(taken("email", message)))
}

pub async fn check_contact_phone(
    Extension(services): Extension<Services>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<TakenDto> {
    let message = services.sellers.check_contact_phone(&query.search).await?;
    Ok(Json(taken("phone", message)))
}

// ===== Seller branch locations =====

pub async fn create_branch(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
    Payload(req): Payload<SellerBranchLocationRequest>,
) -> ApiResult<SellerBranchLocationDto> {
    let branch = services.sellers.create_branch(org_id, req.into()).await?;
    Ok(Json(branch.into()))
}

pub async fn list_branches(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
) -> ApiResult<Vec<SellerBranchLocationDto>> {
    list_json(services.sellers.filter_branches(org_id, "").await?)
}

pub async fn get_branch(
    Extension(services): Extension<Services>,
    Path((org_id, branch_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<SellerBranchLocationDto> {
    Ok(Json(services.sellers.get_branch(org_id, branch_id).await?.into()))
}

pub async fn update_branch(
    Extension(services): Extension<Services>,
    Path((org_id, branch_id)): Path<(Uuid, Uuid)>,
    Payload(req): Payload<SellerBranchLocationRequest>,
) -> ApiResult<SellerBranchLocationDto> {
    let branch = services
        .sellers
        .update_branch(org_id, branch_id, req.into())
        .await?;
    Ok(Json(branch.into()))
}

pub async fn set_branch_status(
    Extension(services): Extension<Services>,
    Path((org_id, status)): Path<(Uuid, String)>,
    Payload(req): Payload<StatusChangeRequest>,
) -> ApiResult<SellerBranchLocationDto> {
    let status = lifecycle_segment(&status)?;
    let branch = services
        .sellers
        .set_branch_status(org_id, req.id, status)
        .await?;
    Ok(Json(branch.into()))
}

pub async fn filter_branches(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<SellerBranchLocationDto>> {
    list_json(services.sellers.filter_branches(org_id, &query.search).await?)
}

pub async fn paginate_branches(
    Extension(services): Extension<Services>,
    Extension(settings): Settings,
    Path(org_id): Path<Uuid>,
    ValidQuery(query): ValidQuery<PaginateQuery>,
) -> ApiResult<PageDto<SellerBranchLocationDto>> {
    let request = to_page_request(&settings, query)?;
    page_json(services.sellers.paginate_branches(org_id, &request).await?)
}

// ===== Seller payment term =====

pub async fn create_payment_term(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
    Payload(req): Payload<SellerPaymentTermRequest>,
) -> ApiResult<SellerPaymentTermDto> {
    let term = services
        .sellers
        .create_payment_term(org_id, req.into())
        .await?;
    Ok(Json(term.into()))
}

pub async fn get_payment_term(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
) -> ApiResult<SellerPaymentTermDto> {
    Ok(Json(services.sellers.get_payment_term(org_id).await?.into()))
}

pub async fn update_payment_term(
    Extension(services): Extension<Services>,
    Path(org_id): Path<Uuid>,
    Payload(req): Payload<SellerPaymentTermRequest>,
) -> ApiResult<SellerPaymentTermDto> {
    let term = services
        .sellers
        .update_payment_term(org_id, req.into())
        .await?;
    Ok(Json(term.into()))
}
