//! Common test utilities: an in-memory store behind every repository trait
//! and fixtures that build isolated entity graphs per test

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use marketplace_service::contract::*;
use marketplace_service::domain::repository::*;
use marketplace_service::domain::{
    EventPublisher, PagingPolicy, Repositories, Services, WorkflowEvent,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

fn contains(value: &str, search: &str) -> bool {
    value.to_lowercase().contains(&search.to_lowercase())
}

fn contains_opt(value: &Option<String>, search: &str) -> bool {
    value.as_deref().is_some_and(|v| contains(v, search))
}

fn unique(detail: &str) -> StorageError {
    StorageError::UniqueViolation(detail.to_string())
}

/// Column lookup used by the in-memory pagination
pub trait Sortable {
    fn sort_key(&self, column: &str) -> Option<String>;
    fn id(&self) -> Uuid;
}

fn normalize(column: &str) -> String {
    column.replace('_', "").to_lowercase()
}

fn paginate<T: Sortable + Clone>(mut items: Vec<T>, request: &PageRequest) -> StorageResult<Page<T>> {
    let column = normalize(&request.column_key);
    if let Some(first) = items.first() {
        if first.sort_key(&column).is_none() {
            return Err(StorageError::UnknownColumn(request.column_key.clone()));
        }
    }
    items.sort_by(|a, b| {
        let ord = a
            .sort_key(&column)
            .cmp(&b.sort_key(&column))
            .then_with(|| a.id().cmp(&b.id()));
        match request.sort {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    let total_record_count = items.len() as u64;
    let skip = ((request.page.max(1) - 1) * request.page_size) as usize;
    let data = items
        .into_iter()
        .skip(skip)
        .take(request.page_size as usize)
        .collect();
    Ok(Page {
        data,
        total_record_count,
    })
}

impl Sortable for SellerOrganisation {
    fn sort_key(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "companyname" => Some(self.company_name.clone()),
            "companyemail" => Some(self.company_email.clone()),
            "companyphone" => Some(self.company_phone.clone()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sortable for SellerContact {
    fn sort_key(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            _ => None,
        }
    }
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sortable for SellerBranchLocation {
    fn sort_key(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "branchname" => Some(self.branch_name.clone()),
            "branchaddress" => Some(self.branch_address.clone()),
            _ => None,
        }
    }
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sortable for SellerItem {
    fn sort_key(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "producttitle" => Some(self.product_title.clone()),
            "brandmodel" => Some(self.brand_model.clone().unwrap_or_default()),
            "modelnumber" => Some(self.model_number.clone().unwrap_or_default()),
            _ => None,
        }
    }
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Sortable for SubCategory {
    fn sort_key(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "title" => Some(self.title.clone()),
            _ => None,
        }
    }
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Every table of the marketplace, held in memory
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    roles: RwLock<HashMap<Uuid, UserRole>>,
    permissions: RwLock<Vec<Permission>>,
    role_permissions: RwLock<HashMap<Uuid, Vec<Uuid>>>,
    user_roles: RwLock<HashMap<Uuid, Vec<Uuid>>>,
    buyers: RwLock<HashMap<Uuid, BuyerOrganisation>>,
    sellers: RwLock<HashMap<Uuid, SellerOrganisation>>,
    contacts: RwLock<HashMap<Uuid, SellerContact>>,
    branches: RwLock<HashMap<Uuid, SellerBranchLocation>>,
    payment_terms: RwLock<HashMap<Uuid, SellerPaymentTerm>>,
    items: RwLock<HashMap<Uuid, SellerItem>>,
    mains: RwLock<HashMap<Uuid, MainCategory>>,
    subs: RwLock<HashMap<Uuid, SubCategory>>,
    events: RwLock<Vec<EventLog>>,
    tickets: RwLock<HashMap<Uuid, TicketBody>>,
    line_items: RwLock<HashMap<Uuid, TicketLineItem>>,
    labels: RwLock<HashMap<Uuid, TicketLabel>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
    links: RwLock<Vec<(LinkKind, Uuid, Uuid)>>,
    uoms: RwLock<Vec<UomReference>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            access: self.clone(),
            buyers: self.clone(),
            sellers: self.clone(),
            items: self.clone(),
            categories: self.clone(),
            tickets: self.clone(),
            comments: self.clone(),
            links: self.clone(),
            uoms: self.clone(),
        }
    }

    pub fn link_count(&self, kind: LinkKind) -> usize {
        self.links.read().iter().filter(|(k, _, _)| *k == kind).count()
    }

    pub fn line_item_count(&self) -> usize {
        self.line_items.read().len()
    }

    fn insert_link(&self, kind: LinkKind, a: Uuid, b: Uuid) -> StorageResult<()> {
        let mut links = self.links.write();
        if links.contains(&(kind, a, b)) {
            return Err(unique(&format!("{} ({}, {})", kind, a, b)));
        }
        links.push((kind, a, b));
        Ok(())
    }

    fn drop_links_touching(&self, ids: &[Uuid]) {
        self.links
            .write()
            .retain(|(_, a, b)| !ids.contains(a) && !ids.contains(b));
    }
}

fn remove_all<T>(map: &RwLock<HashMap<Uuid, T>>, ids: &[Uuid]) -> u64 {
    let mut map = map.write();
    ids.iter().filter(|id| map.remove(id).is_some()).count() as u64
}

fn find_all<T: Clone>(map: &RwLock<HashMap<Uuid, T>>, ids: &[Uuid]) -> Vec<T> {
    let map = map.read();
    ids.iter().filter_map(|id| map.get(id).cloned()).collect()
}

#[async_trait]
impl AccessRepository for InMemoryStore {
    async fn insert_user(&self, user: &User) -> StorageResult<User> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(unique("user.email"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_user(&self, id: Uuid) -> StorageResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn delete_users(&self, ids: &[Uuid]) -> StorageResult<u64> {
        Ok(remove_all(&self.users, ids))
    }

    async fn insert_role(&self, role: &UserRole) -> StorageResult<UserRole> {
        self.roles.write().insert(role.id, role.clone());
        Ok(role.clone())
    }

    async fn find_role(&self, id: Uuid) -> StorageResult<Option<UserRole>> {
        Ok(self.roles.read().get(&id).cloned())
    }

    async fn ensure_permissions(&self, values: &[&str]) -> StorageResult<Vec<Permission>> {
        let mut permissions = self.permissions.write();
        for value in values {
            if !permissions.iter().any(|p| p.value == *value) {
                permissions.push(Permission {
                    id: Uuid::new_v4(),
                    value: value.to_string(),
                });
            }
        }
        let mut requested: Vec<Permission> = permissions
            .iter()
            .filter(|p| values.contains(&p.value.as_str()))
            .cloned()
            .collect();
        requested.sort_by(|a, b| a.value.cmp(&b.value));
        Ok(requested)
    }

    async fn find_permission_by_value(&self, value: &str) -> StorageResult<Option<Permission>> {
        Ok(self
            .permissions
            .read()
            .iter()
            .find(|p| p.value == value)
            .cloned())
    }

    async fn replace_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
        _linked_by: Uuid,
    ) -> StorageResult<()> {
        self.role_permissions
            .write()
            .insert(role_id, permission_ids.to_vec());
        Ok(())
    }

    async fn replace_user_roles(
        &self,
        user_id: Uuid,
        role_ids: &[Uuid],
        _linked_by: Uuid,
    ) -> StorageResult<()> {
        self.user_roles.write().insert(user_id, role_ids.to_vec());
        Ok(())
    }

    async fn permission_values_for_user(&self, user_id: Uuid) -> StorageResult<Vec<String>> {
        let role_ids = self
            .user_roles
            .read()
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        let role_permissions = self.role_permissions.read();
        let permissions = self.permissions.read();
        let mut values: Vec<String> = role_ids
            .iter()
            .flat_map(|r| role_permissions.get(r).cloned().unwrap_or_default())
            .filter_map(|pid| permissions.iter().find(|p| p.id == pid))
            .map(|p| p.value.clone())
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }
}

#[async_trait]
impl BuyerOrganisationRepository for InMemoryStore {
    async fn insert(&self, organisation: &BuyerOrganisation) -> StorageResult<BuyerOrganisation> {
        self.buyers
            .write()
            .insert(organisation.id, organisation.clone());
        Ok(organisation.clone())
    }

    async fn find(&self, id: Uuid) -> StorageResult<Option<BuyerOrganisation>> {
        Ok(self.buyers.read().get(&id).cloned())
    }

    async fn list_all(&self) -> StorageResult<Vec<BuyerOrganisation>> {
        let mut all: Vec<_> = self.buyers.read().values().cloned().collect();
        all.sort_by(|a, b| a.company_name.cmp(&b.company_name));
        Ok(all)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> StorageResult<u64> {
        Ok(remove_all(&self.buyers, ids))
    }
}

impl InMemoryStore {
    fn check_seller_unique(&self, org: &SellerOrganisation) -> StorageResult<()> {
        let sellers = self.sellers.read();
        for other in sellers.values().filter(|o| o.id != org.id) {
            if other.company_email.eq_ignore_ascii_case(&org.company_email) {
                return Err(unique("seller_organisation.company_email"));
            }
            if other.company_phone == org.company_phone {
                return Err(unique("seller_organisation.company_phone"));
            }
        }
        Ok(())
    }

    fn check_contact_unique(&self, contact: &SellerContact) -> StorageResult<()> {
        let contacts = self.contacts.read();
        for other in contacts.values().filter(|c| c.id != contact.id) {
            if other.email.eq_ignore_ascii_case(&contact.email) {
                return Err(unique("seller_contact.email"));
            }
            if other.phone == contact.phone {
                return Err(unique("seller_contact.phone"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SellerOrganisationRepository for InMemoryStore {
    async fn insert_organisation(
        &self,
        organisation: &SellerOrganisation,
        contacts: &[SellerContact],
        branch_locations: &[SellerBranchLocation],
    ) -> StorageResult<SellerOrganisation> {
        self.check_seller_unique(organisation)?;
        for contact in contacts {
            self.check_contact_unique(contact)?;
        }
        self.sellers
            .write()
            .insert(organisation.id, organisation.clone());
        for contact in contacts {
            self.contacts.write().insert(contact.id, contact.clone());
        }
        for branch in branch_locations {
            self.branches.write().insert(branch.id, branch.clone());
        }
        Ok(organisation.clone())
    }

    async fn find_organisation(&self, id: Uuid) -> StorageResult<Option<SellerOrganisation>> {
        Ok(self.sellers.read().get(&id).cloned())
    }

    async fn list_organisations(&self) -> StorageResult<Vec<SellerOrganisation>> {
        Ok(self.sellers.read().values().cloned().collect())
    }

    async fn filter_organisations(&self, search: &str) -> StorageResult<Vec<SellerOrganisation>> {
        Ok(self
            .sellers
            .read()
            .values()
            .filter(|o| {
                contains(&o.company_name, search)
                    || contains(&o.company_email, search)
                    || contains(&o.company_phone, search)
            })
            .cloned()
            .collect())
    }

    async fn paginate_organisations(
        &self,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerOrganisation>> {
        paginate(self.sellers.read().values().cloned().collect(), request)
    }

    async fn update_organisation(
        &self,
        organisation: &SellerOrganisation,
    ) -> StorageResult<SellerOrganisation> {
        self.check_seller_unique(organisation)?;
        self.sellers
            .write()
            .insert(organisation.id, organisation.clone());
        Ok(organisation.clone())
    }

    async fn delete_organisations(&self, ids: &[Uuid]) -> StorageResult<u64> {
        Ok(remove_all(&self.sellers, ids))
    }

    async fn find_organisation_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<SellerOrganisation>> {
        Ok(self
            .sellers
            .read()
            .values()
            .find(|o| o.company_email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_organisation_by_phone(
        &self,
        phone: &str,
    ) -> StorageResult<Option<SellerOrganisation>> {
        Ok(self
            .sellers
            .read()
            .values()
            .find(|o| o.company_phone == phone)
            .cloned())
    }

    async fn find_organisation_by_name(
        &self,
        name: &str,
    ) -> StorageResult<Option<SellerOrganisation>> {
        Ok(self
            .sellers
            .read()
            .values()
            .find(|o| o.company_name.to_lowercase() == name.to_lowercase())
            .cloned())
    }

    async fn insert_contact(&self, contact: &SellerContact) -> StorageResult<SellerContact> {
        self.check_contact_unique(contact)?;
        self.contacts.write().insert(contact.id, contact.clone());
        Ok(contact.clone())
    }

    async fn find_contact(&self, id: Uuid) -> StorageResult<Option<SellerContact>> {
        Ok(self.contacts.read().get(&id).cloned())
    }

    async fn update_contact(&self, contact: &SellerContact) -> StorageResult<SellerContact> {
        self.check_contact_unique(contact)?;
        self.contacts.write().insert(contact.id, contact.clone());
        Ok(contact.clone())
    }

    async fn filter_contacts(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> StorageResult<Vec<SellerContact>> {
        Ok(self
            .contacts
            .read()
            .values()
            .filter(|c| c.seller_organisation_id == organisation_id)
            .filter(|c| {
                contains(&c.name, search)
                    || contains(&c.email, search)
                    || contains(&c.phone, search)
                    || contains_opt(&c.department, search)
                    || contains_opt(&c.role, search)
            })
            .cloned()
            .collect())
    }

    async fn paginate_contacts(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerContact>> {
        let contacts = self
            .contacts
            .read()
            .values()
            .filter(|c| c.seller_organisation_id == organisation_id)
            .cloned()
            .collect();
        paginate(contacts, request)
    }

    async fn find_contact_by_email(&self, email: &str) -> StorageResult<Option<SellerContact>> {
        Ok(self
            .contacts
            .read()
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_contact_by_phone(&self, phone: &str) -> StorageResult<Option<SellerContact>> {
        Ok(self
            .contacts
            .read()
            .values()
            .find(|c| c.phone == phone)
            .cloned())
    }

    async fn insert_branch(
        &self,
        branch: &SellerBranchLocation,
    ) -> StorageResult<SellerBranchLocation> {
        self.branches.write().insert(branch.id, branch.clone());
        Ok(branch.clone())
    }

    async fn find_branch(&self, id: Uuid) -> StorageResult<Option<SellerBranchLocation>> {
        Ok(self.branches.read().get(&id).cloned())
    }

    async fn update_branch(
        &self,
        branch: &SellerBranchLocation,
    ) -> StorageResult<SellerBranchLocation> {
        self.branches.write().insert(branch.id, branch.clone());
        Ok(branch.clone())
    }

    async fn filter_branches(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> StorageResult<Vec<SellerBranchLocation>> {
        Ok(self
            .branches
            .read()
            .values()
            .filter(|b| b.seller_organisation_id == organisation_id)
            .filter(|b| contains(&b.branch_name, search) || contains(&b.branch_address, search))
            .cloned()
            .collect())
    }

    async fn paginate_branches(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerBranchLocation>> {
        let branches = self
            .branches
            .read()
            .values()
            .filter(|b| b.seller_organisation_id == organisation_id)
            .cloned()
            .collect();
        paginate(branches, request)
    }

    async fn insert_payment_term(
        &self,
        term: &SellerPaymentTerm,
    ) -> StorageResult<SellerPaymentTerm> {
        let mut terms = self.payment_terms.write();
        if terms
            .values()
            .any(|t| t.bank_account_number.is_some() && t.bank_account_number == term.bank_account_number)
        {
            return Err(unique("seller_payment_term.bank_account_number"));
        }
        terms.insert(term.id, term.clone());
        Ok(term.clone())
    }

    async fn find_payment_term_by_organisation(
        &self,
        organisation_id: Uuid,
    ) -> StorageResult<Option<SellerPaymentTerm>> {
        Ok(self
            .payment_terms
            .read()
            .values()
            .find(|t| t.seller_organisation_id == organisation_id)
            .cloned())
    }

    async fn update_payment_term(
        &self,
        term: &SellerPaymentTerm,
    ) -> StorageResult<SellerPaymentTerm> {
        self.payment_terms.write().insert(term.id, term.clone());
        Ok(term.clone())
    }
}

#[async_trait]
impl SellerItemRepository for InMemoryStore {
    async fn insert(
        &self,
        item: &SellerItem,
        sub_category_ids: &[Uuid],
        _linked_by: Uuid,
    ) -> StorageResult<SellerItem> {
        self.items.write().insert(item.id, item.clone());
        for sub in sub_category_ids {
            self.insert_link(LinkKind::SellerItemInSubCategory, item.id, *sub)?;
        }
        Ok(item.clone())
    }

    async fn find(&self, id: Uuid) -> StorageResult<Option<SellerItem>> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> StorageResult<Vec<SellerItem>> {
        Ok(find_all(&self.items, ids))
    }

    async fn update(&self, item: &SellerItem) -> StorageResult<SellerItem> {
        self.items.write().insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> StorageResult<u64> {
        self.drop_links_touching(ids);
        Ok(remove_all(&self.items, ids))
    }

    async fn filter(
        &self,
        field: SellerItemSearchField,
        search: &str,
    ) -> StorageResult<Vec<SellerItem>> {
        let links = self.links.read().clone();
        let subs = self.subs.read().clone();
        let sellers = self.sellers.read().clone();
        Ok(self
            .items
            .read()
            .values()
            .filter(|item| match field {
                SellerItemSearchField::Any => {
                    contains(&item.product_title, search)
                        || contains_opt(&item.brand_model, search)
                        || contains_opt(&item.model_number, search)
                }
                SellerItemSearchField::BrandModel => contains_opt(&item.brand_model, search),
                SellerItemSearchField::ModelNumber => contains_opt(&item.model_number, search),
                SellerItemSearchField::ProductTitle => contains(&item.product_title, search),
                SellerItemSearchField::CategoryTitle => links.iter().any(|(k, a, b)| {
                    *k == LinkKind::SellerItemInSubCategory
                        && *a == item.id
                        && subs.get(b).is_some_and(|s| contains(&s.title, search))
                }),
                SellerItemSearchField::SellerOrganisation => item
                    .seller_organisation_id
                    .and_then(|id| sellers.get(&id))
                    .is_some_and(|o| contains(&o.company_name, search)),
            })
            .cloned()
            .collect())
    }

    async fn paginate(&self, request: &PageRequest) -> StorageResult<Page<SellerItem>> {
        paginate(self.items.read().values().cloned().collect(), request)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn apply_snapshot(&self, snapshot: &[CategorySnapshot]) -> StorageResult<RefreshSummary> {
        let now = Utc::now();
        let mut summary = RefreshSummary::default();
        let mut mains = self.mains.write();
        let mut subs = self.subs.write();
        for main in snapshot {
            let main_id = match mains.values_mut().find(|m| m.external_id == main.external_id) {
                Some(existing) => {
                    existing.title = main.title.clone();
                    existing.updated_at = now;
                    existing.id
                }
                None => {
                    let id = Uuid::new_v4();
                    mains.insert(
                        id,
                        MainCategory {
                            id,
                            external_id: main.external_id.clone(),
                            title: main.title.clone(),
                            updated_at: now,
                        },
                    );
                    id
                }
            };
            summary.main_categories += 1;
            for sub in &main.sub_categories {
                match subs.values_mut().find(|s| s.external_id == sub.external_id) {
                    Some(existing) => {
                        existing.title = sub.title.clone();
                        existing.main_category_id = main_id;
                        existing.updated_at = now;
                    }
                    None => {
                        let id = Uuid::new_v4();
                        subs.insert(
                            id,
                            SubCategory {
                                id,
                                external_id: sub.external_id.clone(),
                                main_category_id: main_id,
                                title: sub.title.clone(),
                                updated_at: now,
                            },
                        );
                    }
                }
                summary.sub_categories += 1;
            }
        }
        Ok(summary)
    }

    async fn list_main(&self) -> StorageResult<Vec<MainCategory>> {
        let mut all: Vec<_> = self.mains.read().values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }

    async fn find_sub(&self, id: Uuid) -> StorageResult<Option<SubCategory>> {
        Ok(self.subs.read().get(&id).cloned())
    }

    async fn find_subs(&self, ids: &[Uuid]) -> StorageResult<Vec<SubCategory>> {
        Ok(find_all(&self.subs, ids))
    }

    async fn filter_subs(&self, search: &str) -> StorageResult<Vec<SubCategory>> {
        Ok(self
            .subs
            .read()
            .values()
            .filter(|s| contains(&s.title, search))
            .cloned()
            .collect())
    }

    async fn paginate_subs(&self, request: &PageRequest) -> StorageResult<Page<SubCategory>> {
        paginate(self.subs.read().values().cloned().collect(), request)
    }

    async fn delete_all(&self) -> StorageResult<u64> {
        let count = (self.subs.read().len() + self.mains.read().len()) as u64;
        self.subs.write().clear();
        self.mains.write().clear();
        Ok(count)
    }

    async fn append_event(&self, event: &EventLog) -> StorageResult<EventLog> {
        self.events.write().push(event.clone());
        Ok(event.clone())
    }

    async fn last_event(
        &self,
        event_type: EventType,
        entity: &str,
    ) -> StorageResult<Option<EventLog>> {
        Ok(self
            .events
            .read()
            .iter()
            .filter(|e| e.event_type == event_type && e.entity == entity)
            .max_by_key(|e| e.created_at)
            .cloned())
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn insert_ticket(&self, ticket: &TicketBody) -> StorageResult<TicketBody> {
        self.tickets.write().insert(ticket.id, ticket.clone());
        Ok(ticket.clone())
    }

    async fn find_ticket(&self, id: Uuid) -> StorageResult<Option<TicketBody>> {
        Ok(self.tickets.read().get(&id).cloned())
    }

    async fn find_tickets(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketBody>> {
        Ok(find_all(&self.tickets, ids))
    }

    async fn list_tickets(
        &self,
        buyer_organisation_id: Option<Uuid>,
    ) -> StorageResult<Vec<TicketBody>> {
        Ok(self
            .tickets
            .read()
            .values()
            .filter(|t| buyer_organisation_id.is_none_or(|b| t.buyer_organisation_id == b))
            .cloned()
            .collect())
    }

    async fn update_ticket(&self, ticket: &TicketBody) -> StorageResult<TicketBody> {
        self.tickets.write().insert(ticket.id, ticket.clone());
        Ok(ticket.clone())
    }

    async fn delete_tickets(&self, ids: &[Uuid]) -> StorageResult<u64> {
        let line_item_ids: Vec<Uuid> = self
            .links
            .read()
            .iter()
            .filter(|(k, a, _)| *k == LinkKind::LineItemInTicketBody && ids.contains(a))
            .map(|(_, _, b)| *b)
            .collect();
        remove_all(&self.line_items, &line_item_ids);
        self.drop_links_touching(&line_item_ids);
        self.drop_links_touching(ids);
        Ok(remove_all(&self.tickets, ids))
    }

    async fn insert_line_item(
        &self,
        line_item: &TicketLineItem,
        ticket_id: Uuid,
        _linked_by: Uuid,
    ) -> StorageResult<TicketLineItem> {
        self.line_items
            .write()
            .insert(line_item.id, line_item.clone());
        self.insert_link(LinkKind::LineItemInTicketBody, ticket_id, line_item.id)?;
        Ok(line_item.clone())
    }

    async fn find_line_item(&self, id: Uuid) -> StorageResult<Option<TicketLineItem>> {
        Ok(self.line_items.read().get(&id).cloned())
    }

    async fn find_line_items(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketLineItem>> {
        Ok(find_all(&self.line_items, ids))
    }

    async fn update_line_item(&self, line_item: &TicketLineItem) -> StorageResult<TicketLineItem> {
        self.line_items
            .write()
            .insert(line_item.id, line_item.clone());
        Ok(line_item.clone())
    }

    async fn delete_line_items(&self, ids: &[Uuid]) -> StorageResult<u64> {
        self.drop_links_touching(ids);
        Ok(remove_all(&self.line_items, ids))
    }

    async fn insert_label(&self, label: &TicketLabel) -> StorageResult<TicketLabel> {
        self.labels.write().insert(label.id, label.clone());
        Ok(label.clone())
    }

    async fn find_label(&self, id: Uuid) -> StorageResult<Option<TicketLabel>> {
        Ok(self.labels.read().get(&id).cloned())
    }

    async fn find_labels(&self, ids: &[Uuid]) -> StorageResult<Vec<TicketLabel>> {
        Ok(find_all(&self.labels, ids))
    }

    async fn update_label(&self, label: &TicketLabel) -> StorageResult<TicketLabel> {
        self.labels.write().insert(label.id, label.clone());
        Ok(label.clone())
    }

    async fn list_labels(&self) -> StorageResult<Vec<TicketLabel>> {
        let mut all: Vec<_> = self.labels.read().values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }
}

#[async_trait]
impl UomRepository for InMemoryStore {
    async fn insert_many(&self, uoms: &[UomReference]) -> StorageResult<Vec<UomReference>> {
        let mut stored = self.uoms.write();
        for uom in uoms {
            if stored.iter().any(|u| u.uom_code == uom.uom_code) {
                return Err(unique("uom_references.uom_code"));
            }
        }
        stored.extend(uoms.iter().cloned());
        Ok(uoms.to_vec())
    }

    async fn list(&self) -> StorageResult<Vec<UomReference>> {
        let mut all = self.uoms.read().clone();
        all.sort_by(|a, b| a.uom_code.cmp(&b.uom_code));
        Ok(all)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &Comment) -> StorageResult<Comment> {
        self.comments.write().insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn find(&self, id: Uuid) -> StorageResult<Option<Comment>> {
        Ok(self.comments.read().get(&id).cloned())
    }

    async fn update(&self, comment: &Comment) -> StorageResult<Comment> {
        self.comments.write().insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        self.comments.write().remove(&id);
        Ok(())
    }

    async fn list_for_target(&self, target: CommentTarget) -> StorageResult<Vec<Comment>> {
        let mut all: Vec<_> = self
            .comments
            .read()
            .values()
            .filter(|c| c.target == target)
            .cloned()
            .collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn link(&self, kind: LinkKind, a: Uuid, b: Uuid, _linked_by: Uuid) -> StorageResult<()> {
        self.insert_link(kind, a, b)
    }

    async fn unlink(&self, kind: LinkKind, a: Uuid, b: Uuid) -> StorageResult<bool> {
        let mut links = self.links.write();
        let before = links.len();
        links.retain(|link| *link != (kind, a, b));
        Ok(links.len() != before)
    }

    async fn list_b(&self, kind: LinkKind, a: Uuid) -> StorageResult<Vec<Uuid>> {
        Ok(self
            .links
            .read()
            .iter()
            .filter(|(k, x, _)| *k == kind && *x == a)
            .map(|(_, _, b)| *b)
            .collect())
    }

    async fn list_a(&self, kind: LinkKind, b: Uuid) -> StorageResult<Vec<Uuid>> {
        Ok(self
            .links
            .read()
            .iter()
            .filter(|(k, _, y)| *k == kind && *y == b)
            .map(|(_, a, _)| *a)
            .collect())
    }

    async fn replace(
        &self,
        kind: LinkKind,
        a: Uuid,
        bs: &[Uuid],
        _linked_by: Uuid,
    ) -> StorageResult<()> {
        let mut links = self.links.write();
        links.retain(|(k, x, _)| !(*k == kind && *x == a));
        links.extend(bs.iter().map(|b| (kind, a, *b)));
        Ok(())
    }
}

/// Category source answering with a fixed snapshot
pub struct StaticCategorySource {
    snapshot: RwLock<Vec<CategorySnapshot>>,
}

impl StaticCategorySource {
    pub fn new(snapshot: Vec<CategorySnapshot>) -> Arc<Self> {
        Arc::new(Self {
            snapshot: RwLock::new(snapshot),
        })
    }

    pub fn replace(&self, snapshot: Vec<CategorySnapshot>) {
        *self.snapshot.write() = snapshot;
    }
}

#[async_trait]
impl CategorySource for StaticCategorySource {
    async fn fetch(&self) -> anyhow::Result<Vec<CategorySnapshot>> {
        Ok(self.snapshot.read().clone())
    }
}

/// Keeps every published event for assertions
#[derive(Default)]
pub struct RecordingPublisher {
    events: RwLock<Vec<WorkflowEvent>>,
}

impl RecordingPublisher {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.read().iter().map(|e| e.name()).collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: WorkflowEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

pub fn office_supplies() -> Vec<CategorySnapshot> {
    vec![CategorySnapshot {
        external_id: "10".to_string(),
        title: "Office Supplies".to_string(),
        sub_categories: vec![
            SubCategorySnapshot {
                external_id: "101".to_string(),
                title: "Office Chairs".to_string(),
            },
            SubCategorySnapshot {
                external_id: "102".to_string(),
                title: "Desks".to_string(),
            },
        ],
    }]
}

/// Isolated services over a fresh in-memory store
pub struct TestEnv {
    pub store: Arc<InMemoryStore>,
    pub source: Arc<StaticCategorySource>,
    pub events: Arc<RecordingPublisher>,
    pub services: Services,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let source = StaticCategorySource::new(office_supplies());
        let events = Arc::new(RecordingPublisher::default());
        let services = Services::new(
            store.repositories(),
            source.clone(),
            events.clone(),
            PagingPolicy { max_page_size: 50 },
        );
        Self {
            store,
            source,
            events,
            services,
        }
    }

    /// A user with no roles
    pub async fn user(&self, name: &str) -> Uuid {
        let email = format!("{}.{}@example.com", name.to_lowercase(), Uuid::new_v4().simple());
        self.services
            .access
            .create_user(name, &email)
            .await
            .unwrap()
            .id
    }

    /// A user holding exactly `actions`
    pub async fn user_with(&self, name: &str, actions: &[Action]) -> Uuid {
        let user = self.user(name).await;
        self.services
            .access
            .grant_role(user, &format!("{} role", name), actions, user)
            .await
            .unwrap();
        user
    }

    pub async fn admin(&self) -> Uuid {
        self.user_with("Admin", &[Action::TicketingAdmin]).await
    }

    pub async fn buyer(&self, acting_user: Uuid) -> Uuid {
        self.services
            .buyers
            .create(
                BuyerOrganisationFields {
                    company_name: "Vega Procurement".to_string(),
                    company_email: Some("buying@vega.co.uk".to_string()),
                    company_phone: None,
                    remarks: None,
                },
                acting_user,
            )
            .await
            .unwrap()
            .id
    }

    pub async fn ticket(&self, buyer: Uuid, owner: Option<Uuid>, acting_user: Uuid) -> TicketBody {
        self.services
            .tickets
            .create(buyer, new_ticket("Office refit", owner), acting_user)
            .await
            .unwrap()
    }

    pub async fn line_item(
        &self,
        ticket: Uuid,
        owner: Option<Uuid>,
        acting_user: Uuid,
    ) -> TicketLineItem {
        self.services
            .line_items
            .create(ticket, new_line_item("Ergonomic chair", owner), acting_user)
            .await
            .unwrap()
    }

    pub async fn seller_item(&self, acting_user: Uuid) -> SellerItem {
        self.services
            .items
            .create(
                SellerItemFields {
                    product_title: "Aeron Chair".to_string(),
                    brand_model: Some("Herman Miller".to_string()),
                    model_number: Some("AER-B".to_string()),
                    ..Default::default()
                },
                &[],
                acting_user,
            )
            .await
            .unwrap()
    }
}

pub fn new_ticket(title: &str, owner: Option<Uuid>) -> NewTicketBody {
    NewTicketBody {
        title: title.to_string(),
        priority: Priority::Normal,
        deadline: None,
        owner_id: owner,
    }
}

pub fn new_line_item(name: &str, owner: Option<Uuid>) -> NewTicketLineItem {
    NewTicketLineItem {
        details: LineItemGeneralDetails {
            item_name: name.to_string(),
            quantity: 4,
            budget_cents: Some(120_000),
            deadline: None,
            sourcing_remarks: None,
        },
        owner_id: owner,
    }
}

pub fn seller(name: &str, email: &str, phone: &str) -> NewSellerOrganisation {
    NewSellerOrganisation {
        basic: SellerOrganisationBasicInformation {
            company_name: name.to_string(),
            company_email: email.to_string(),
            company_phone: phone.to_string(),
            company_address: None,
        },
        ..Default::default()
    }
}

pub fn page(column_key: &str, page: u64, page_size: u64) -> PageRequest {
    PageRequest {
        column_key: column_key.to_string(),
        sort: SortOrder::Asc,
        page,
        page_size,
    }
}

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn print_stage(stage: &str) {
    println!("\n📝 {}", stage);
}
