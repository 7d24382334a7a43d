//! Seller organisations, their contacts, branch locations and payment terms

use super::PagingPolicy;
use crate::contract::{
    LifecycleStatus, MarketplaceError, NewSellerOrganisation, Page, PageRequest,
    SellerBranchLocation, SellerBranchLocationFields, SellerContact, SellerContactFields,
    SellerOrganisation, SellerOrganisationBasicInformation, SellerOrganisationDetailsInformation,
    SellerPaymentTerm, SellerPaymentTermFields,
};
use crate::domain::repository::SellerOrganisationRepository;
use crate::domain::validation::{normalize_optional, require_text, validate_email};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const EMAIL_EXISTS: &str = "Email already exists";
pub const PHONE_EXISTS: &str = "Phone already exists";
pub const COMPANY_NAME_EXISTS: &str = "Company name already exists";

pub struct SellerOrganisationService {
    seller_repo: Arc<dyn SellerOrganisationRepository>,
    paging: PagingPolicy,
}

impl SellerOrganisationService {
    pub fn new(seller_repo: Arc<dyn SellerOrganisationRepository>, paging: PagingPolicy) -> Self {
        Self { seller_repo, paging }
    }

    // ===== Organisations =====

    /// Create an organisation, optionally with nested contacts and branches
    pub async fn create(
        &self,
        organisation: NewSellerOrganisation,
    ) -> Result<SellerOrganisation, MarketplaceError> {
        validate_basic(&organisation.basic)?;
        for contact in &organisation.contacts {
            validate_contact(contact)?;
        }
        for branch in &organisation.branch_locations {
            validate_branch(branch)?;
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut record = SellerOrganisation {
            id,
            company_name: String::new(),
            company_email: String::new(),
            company_phone: String::new(),
            company_address: None,
            website: None,
            remarks: None,
            status: LifecycleStatus::Active,
            created_at: now,
            updated_at: now,
        };
        apply_basic(&mut record, organisation.basic);
        apply_details(&mut record, organisation.details);

        let contacts: Vec<SellerContact> = organisation
            .contacts
            .into_iter()
            .map(|fields| new_contact(id, fields))
            .collect();
        let branches: Vec<SellerBranchLocation> = organisation
            .branch_locations
            .into_iter()
            .map(|fields| new_branch(id, fields))
            .collect();

        let created = self
            .seller_repo
            .insert_organisation(&record, &contacts, &branches)
            .await?;
        tracing::info!(
            seller_organisation_id = %created.id,
            contacts = contacts.len(),
            branch_locations = branches.len(),
            "seller organisation created"
        );
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<SellerOrganisation, MarketplaceError> {
        self.seller_repo
            .find_organisation(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("seller_organisation", id))
    }

    pub async fn list(&self) -> Result<Vec<SellerOrganisation>, MarketplaceError> {
        Ok(self.seller_repo.list_organisations().await?)
    }

    /// Case-insensitive substring match on company name, email or phone
    pub async fn filter(&self, search: &str) -> Result<Vec<SellerOrganisation>, MarketplaceError> {
        Ok(self.seller_repo.filter_organisations(search.trim()).await?)
    }

    pub async fn paginate(
        &self,
        request: &PageRequest,
    ) -> Result<Page<SellerOrganisation>, MarketplaceError> {
        self.paging.check(request)?;
        Ok(self.seller_repo.paginate_organisations(request).await?)
    }

    pub async fn update_basic_information(
        &self,
        id: Uuid,
        basic: SellerOrganisationBasicInformation,
    ) -> Result<SellerOrganisation, MarketplaceError> {
        validate_basic(&basic)?;
        let mut record = self.get(id).await?;
        apply_basic(&mut record, basic);
        record.updated_at = Utc::now();
        Ok(self.seller_repo.update_organisation(&record).await?)
    }

    pub async fn update_details_information(
        &self,
        id: Uuid,
        details: SellerOrganisationDetailsInformation,
    ) -> Result<SellerOrganisation, MarketplaceError> {
        let mut record = self.get(id).await?;
        apply_details(&mut record, details);
        record.updated_at = Utc::now();
        Ok(self.seller_repo.update_organisation(&record).await?)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: LifecycleStatus,
    ) -> Result<SellerOrganisation, MarketplaceError> {
        let mut record = self.get(id).await?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(self.seller_repo.update_organisation(&record).await?)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MarketplaceError> {
        Ok(self.seller_repo.delete_organisations(ids).await?)
    }

    // ===== Uniqueness checks =====

    pub async fn check_company_email(
        &self,
        search: &str,
    ) -> Result<Option<&'static str>, MarketplaceError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(None);
        }
        let found = self.seller_repo.find_organisation_by_email(search).await?;
        Ok(found.map(|_| EMAIL_EXISTS))
    }

    pub async fn check_company_phone(
        &self,
        search: &str,
    ) -> Result<Option<&'static str>, MarketplaceError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(None);
        }
        let found = self.seller_repo.find_organisation_by_phone(search).await?;
        Ok(found.map(|_| PHONE_EXISTS))
    }

    /// Case-insensitive exact match on the company name
    pub async fn check_company_name(
        &self,
        search: &str,
    ) -> Result<Option<&'static str>, MarketplaceError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(None);
        }
        let found = self.seller_repo.find_organisation_by_name(search).await?;
        Ok(found.map(|_| COMPANY_NAME_EXISTS))
    }

    // ===== Contacts =====

    pub async fn create_contact(
        &self,
        organisation_id: Uuid,
        fields: SellerContactFields,
    ) -> Result<SellerContact, MarketplaceError> {
        validate_contact(&fields)?;
        self.get(organisation_id).await?;
        Ok(self
            .seller_repo
            .insert_contact(&new_contact(organisation_id, fields))
            .await?)
    }

    /// Contact of the organisation; `NotFound` if it belongs elsewhere
    pub async fn get_contact(
        &self,
        organisation_id: Uuid,
        contact_id: Uuid,
    ) -> Result<SellerContact, MarketplaceError> {
        self.seller_repo
            .find_contact(contact_id)
            .await?
            .filter(|c| c.seller_organisation_id == organisation_id)
            .ok_or_else(|| MarketplaceError::not_found("seller_contact", contact_id))
    }

    pub async fn update_contact(
        &self,
        organisation_id: Uuid,
        contact_id: Uuid,
        fields: SellerContactFields,
    ) -> Result<SellerContact, MarketplaceError> {
        validate_contact(&fields)?;
        let mut contact = self.get_contact(organisation_id, contact_id).await?;
        contact.name = fields.name.trim().to_string();
        contact.email = fields.email.trim().to_string();
        contact.phone = fields.phone.trim().to_string();
        contact.department = normalize_optional(fields.department);
        contact.role = normalize_optional(fields.role);
        contact.updated_at = Utc::now();
        Ok(self.seller_repo.update_contact(&contact).await?)
    }

    pub async fn set_contact_status(
        &self,
        organisation_id: Uuid,
        contact_id: Uuid,
        status: LifecycleStatus,
    ) -> Result<SellerContact, MarketplaceError> {
        let mut contact = self.get_contact(organisation_id, contact_id).await?;
        contact.status = status;
        contact.updated_at = Utc::now();
        Ok(self.seller_repo.update_contact(&contact).await?)
    }

    /// Substring match on name, email, phone, department or role
    pub async fn filter_contacts(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> Result<Vec<SellerContact>, MarketplaceError> {
        Ok(self
            .seller_repo
            .filter_contacts(organisation_id, search.trim())
            .await?)
    }

    pub async fn paginate_contacts(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> Result<Page<SellerContact>, MarketplaceError> {
        self.paging.check(request)?;
        Ok(self
            .seller_repo
            .paginate_contacts(organisation_id, request)
            .await?)
    }

    pub async fn check_contact_email(
        &self,
        search: &str,
    ) -> Result<Option<&'static str>, MarketplaceError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(None);
        }
        let found = self.seller_repo.find_contact_by_email(search).await?;
        Ok(found.map(|_| EMAIL_EXISTS))
    }

    pub async fn check_contact_phone(
        &self,
        search: &str,
    ) -> Result<Option<&'static str>, MarketplaceError> {
        let search = search.trim();
        if search.is_empty() {
            return Ok(None);
        }
        let found = self.seller_repo.find_contact_by_phone(search).await?;
        Ok(found.map(|_| PHONE_EXISTS))
    }

    // ===== Branch locations =====

    pub async fn create_branch(
        &self,
        organisation_id: Uuid,
        fields: SellerBranchLocationFields,
    ) -> Result<SellerBranchLocation, MarketplaceError> {
        validate_branch(&fields)?;
        self.get(organisation_id).await?;
        Ok(self
            .seller_repo
            .insert_branch(&new_branch(organisation_id, fields))
            .await?)
    }

    pub async fn get_branch(
        &self,
        organisation_id: Uuid,
        branch_id: Uuid,
    ) -> Result<SellerBranchLocation, MarketplaceError> {
        self.seller_repo
            .find_branch(branch_id)
            .await?
            .filter(|b| b.seller_organisation_id == organisation_id)
            .ok_or_else(|| MarketplaceError::not_found("seller_branch_location", branch_id))
    }

    pub async fn update_branch(
        &self,
        organisation_id: Uuid,
        branch_id: Uuid,
        fields: SellerBranchLocationFields,
    ) -> Result<SellerBranchLocation, MarketplaceError> {
        validate_branch(&fields)?;
        let mut branch = self.get_branch(organisation_id, branch_id).await?;
        branch.branch_name = fields.branch_name.trim().to_string();
        branch.branch_address = fields.branch_address.trim().to_string();
        branch.updated_at = Utc::now();
        Ok(self.seller_repo.update_branch(&branch).await?)
    }

    pub async fn set_branch_status(
        &self,
        organisation_id: Uuid,
        branch_id: Uuid,
        status: LifecycleStatus,
    ) -> Result<SellerBranchLocation, MarketplaceError> {
        let mut branch = self.get_branch(organisation_id, branch_id).await?;
        branch.status = status;
        branch.updated_at = Utc::now();
        Ok(self.seller_repo.update_branch(&branch).await?)
    }

    pub async fn filter_branches(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> Result<Vec<SellerBranchLocation>, MarketplaceError> {
        Ok(self
            .seller_repo
            .filter_branches(organisation_id, search.trim())
            .await?)
    }

    pub async fn paginate_branches(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> Result<Page<SellerBranchLocation>, MarketplaceError> {
        self.paging.check(request)?;
        Ok(self
            .seller_repo
            .paginate_branches(organisation_id, request)
            .await?)
    }

    // ===== Payment terms =====

    /// At most one payment term per organisation; a second one is a conflict
    pub async fn create_payment_term(
        &self,
        organisation_id: Uuid,
        fields: SellerPaymentTermFields,
    ) -> Result<SellerPaymentTerm, MarketplaceError> {
        require_text("paymentMethod", &fields.payment_method)?;
        self.get(organisation_id).await?;

        if self
            .seller_repo
            .find_payment_term_by_organisation(organisation_id)
            .await?
            .is_some()
        {
            return Err(MarketplaceError::conflict(format!(
                "seller organisation {} already has a payment term",
                organisation_id
            )));
        }

        let now = Utc::now();
        let term = SellerPaymentTerm {
            id: Uuid::new_v4(),
            seller_organisation_id: organisation_id,
            payment_method: fields.payment_method.trim().to_string(),
            bank_name: normalize_optional(fields.bank_name),
            bank_account_holder: normalize_optional(fields.bank_account_holder),
            bank_account_number: normalize_optional(fields.bank_account_number),
            created_at: now,
            updated_at: now,
        };
        Ok(self.seller_repo.insert_payment_term(&term).await?)
    }

    pub async fn get_payment_term(
        &self,
        organisation_id: Uuid,
    ) -> Result<SellerPaymentTerm, MarketplaceError> {
        self.seller_repo
            .find_payment_term_by_organisation(organisation_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("seller_payment_term", organisation_id))
    }

    pub async fn update_payment_term(
        &self,
        organisation_id: Uuid,
        fields: SellerPaymentTermFields,
    ) -> Result<SellerPaymentTerm, MarketplaceError> {
        require_text("paymentMethod", &fields.payment_method)?;
        let mut term = self.get_payment_term(organisation_id).await?;
        term.payment_method = fields.payment_method.trim().to_string();
        term.bank_name = normalize_optional(fields.bank_name);
        term.bank_account_holder = normalize_optional(fields.bank_account_holder);
        term.bank_account_number = normalize_optional(fields.bank_account_number);
        term.updated_at = Utc::now();
        Ok(self.seller_repo.update_payment_term(&term).await?)
    }
}

fn validate_basic(basic: &SellerOrganisationBasicInformation) -> Result<(), MarketplaceError> {
    require_text("companyName", &basic.company_name)?;
    validate_email("companyEmail", basic.company_email.trim())?;
    require_text("companyPhone", &basic.company_phone)
}

fn validate_contact(contact: &SellerContactFields) -> Result<(), MarketplaceError> {
    require_text("name", &contact.name)?;
    validate_email("email", contact.email.trim())?;
    require_text("phone", &contact.phone)
}

fn validate_branch(branch: &SellerBranchLocationFields) -> Result<(), MarketplaceError> {
    require_text("branchName", &branch.branch_name)?;
    require_text("branchAddress", &branch.branch_address)
}

fn apply_basic(record: &mut SellerOrganisation, basic: SellerOrganisationBasicInformation) {
    record.company_name = basic.company_name.trim().to_string();
    record.company_email = basic.company_email.trim().to_string();
    record.company_phone = basic.company_phone.trim().to_string();
    record.company_address = normalize_optional(basic.company_address);
}

fn apply_details(record: &mut SellerOrganisation, details: SellerOrganisationDetailsInformation) {
    record.website = normalize_optional(details.website);
    record.remarks = normalize_optional(details.remarks);
}

fn new_contact(organisation_id: Uuid, fields: SellerContactFields) -> SellerContact {
    let now = Utc::now();
    SellerContact {
        id: Uuid::new_v4(),
        seller_organisation_id: organisation_id,
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        phone: fields.phone.trim().to_string(),
        department: normalize_optional(fields.department),
        role: normalize_optional(fields.role),
        status: LifecycleStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

fn new_branch(organisation_id: Uuid, fields: SellerBranchLocationFields) -> SellerBranchLocation {
    let now = Utc::now();
    SellerBranchLocation {
        id: Uuid::new_v4(),
        seller_organisation_id: organisation_id,
        branch_name: fields.branch_name.trim().to_string(),
        branch_address: fields.branch_address.trim().to_string(),
        status: LifecycleStatus::Active,
        created_at: now,
        updated_at: now,
    }
}
