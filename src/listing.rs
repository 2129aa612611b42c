//! The list + form contract shared by every CRUD page
//!
//! A page owns one [`ResourceList`] (the current page of records and its
//! filter) and one [`FormState`] (a single record being created or edited).
//! Writes never patch the loaded list: after a successful write the page
//! re-reads the list from the backend.

use async_trait::async_trait;
use log::{debug, warn};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::pagination::{ListParams, Page};

/// Anything that can produce a page of records for a filter
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    async fn fetch(&self, params: &ListParams) -> Result<Page<Self::Item>>;
}

/// A list source that also accepts writes driven by a form
#[async_trait]
pub trait CrudResource: ListSource {
    type Id: Copy + PartialEq + fmt::Debug + Send + Sync;
    type Form: Clone + Default + Send + Sync;

    fn id_of(item: &Self::Item) -> Self::Id;

    /// Form pre-populated from an existing record
    fn form_from(item: &Self::Item) -> Self::Form;

    async fn create(&self, form: &Self::Form) -> Result<()>;

    async fn update(&self, id: Self::Id, form: &Self::Form) -> Result<()>;

    async fn remove(&self, id: Self::Id) -> Result<()>;
}

/// Snapshot of a list's filter and loaded data
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub params: ListParams,
    pub page: Page<T>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

struct Inner<T> {
    state: ListState<T>,
    applied: u64,
}

/// Current page of a resource list
///
/// Every fetch takes a ticket from a monotonic counter. A response is only
/// applied when its ticket is newer than the last applied one, so a slow
/// response can never overwrite a fresher one. After [`ResourceList::close`]
/// no response is applied at all.
pub struct ResourceList<S: ListSource> {
    source: S,
    inner: Mutex<Inner<S::Item>>,
    issued: AtomicU64,
    live: AtomicBool,
}

impl<S: ListSource> ResourceList<S> {
    pub fn new(source: S, params: ListParams) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: ListState {
                    params,
                    page: Page::default(),
                    loading: false,
                    loaded: false,
                    error: None,
                },
                applied: 0,
            }),
            issued: AtomicU64::new(0),
            live: AtomicBool::new(true),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S::Item>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ListState<S::Item> {
        self.lock().state.clone()
    }

    pub fn items(&self) -> Vec<S::Item> {
        self.lock().state.page.content.clone()
    }

    pub fn params(&self) -> ListParams {
        self.lock().state.params.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().state.error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    /// Re-read the current page
    pub async fn refresh(&self) -> Result<()> {
        if !self.is_live() {
            return Ok(());
        }

        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let params = {
            let mut inner = self.lock();
            inner.state.loading = true;
            inner.state.params.clone()
        };

        let result = self.source.fetch(&params).await;

        let mut inner = self.lock();
        if !self.is_live() {
            debug!("Dropping list response {} after close", ticket);
            return Ok(());
        }
        if ticket <= inner.applied {
            warn!(
                "Discarding stale list response {} (already showing {})",
                ticket, inner.applied
            );
            return Ok(());
        }

        inner.applied = ticket;
        inner.state.loading = ticket < self.issued.load(Ordering::SeqCst);
        match result {
            Ok(page) => {
                inner.state.page = page;
                inner.state.loaded = true;
                inner.state.error = None;
                Ok(())
            }
            Err(err) => {
                inner.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn update_params<F: FnOnce(&mut ListParams)>(&self, f: F) {
        f(&mut self.lock().state.params);
    }

    /// Change the search text; returns to the first page
    pub async fn set_search(&self, search: &str) -> Result<()> {
        self.update_params(|params| {
            params.search = Some(search.to_string());
            params.page = 0;
        });
        self.refresh().await
    }

    /// Change the category filter; returns to the first page
    pub async fn set_category(&self, category_id: Option<i64>) -> Result<()> {
        self.update_params(|params| {
            params.category_id = category_id;
            params.page = 0;
        });
        self.refresh().await
    }

    pub async fn go_to_page(&self, page: u32) -> Result<()> {
        self.update_params(|params| params.page = page);
        self.refresh().await
    }

    pub async fn next_page(&self) -> Result<()> {
        let next = {
            let inner = self.lock();
            let page = &inner.state.page;
            let current = inner.state.params.page;
            (page.has_next || current + 1 < page.total_pages).then_some(current + 1)
        };
        match next {
            Some(page) => self.go_to_page(page).await,
            None => Ok(()),
        }
    }

    pub async fn previous_page(&self) -> Result<()> {
        let current = self.lock().state.params.page;
        if current == 0 {
            return Ok(());
        }
        self.go_to_page(current - 1).await
    }

    /// Detach the list; later responses are ignored
    pub fn close(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

/// A single record's form
#[derive(Debug, Clone)]
pub struct FormState<F, Id> {
    mode: FormMode<Id>,
    fields: F,
    open: bool,
    saving: bool,
    error: Option<String>,
}

impl<F: Default, Id: Copy> Default for FormState<F, Id> {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            fields: F::default(),
            open: false,
            saving: false,
            error: None,
        }
    }
}

impl<F: Default, Id: Copy> FormState<F, Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode<Id> {
        self.mode
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Empty create form
    pub fn open_create(&mut self) {
        *self = Self::default();
        self.open = true;
    }

    /// Edit form replacing every field with the record's values
    pub fn open_edit(&mut self, id: Id, fields: F) {
        *self = Self {
            mode: FormMode::Edit(id),
            fields,
            open: true,
            saving: false,
            error: None,
        };
    }

    /// Close and return to an empty create form
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn begin_save(&mut self) {
        self.saving = true;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.saving = false;
        self.error = Some(message);
    }
}

/// A list page with create/edit form and confirmed deletion
pub struct CrudPage<R: CrudResource> {
    list: ResourceList<R>,
    form: FormState<R::Form, R::Id>,
    pending_delete: Option<R::Id>,
    error: Option<String>,
}

impl<R: CrudResource> CrudPage<R> {
    pub fn new(resource: R, params: ListParams) -> Self {
        Self {
            list: ResourceList::new(resource, params),
            form: FormState::new(),
            pending_delete: None,
            error: None,
        }
    }

    pub fn list(&self) -> &ResourceList<R> {
        &self.list
    }

    pub fn resource(&self) -> &R {
        self.list.source()
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.list.items()
    }

    pub fn form(&self) -> &FormState<R::Form, R::Id> {
        &self.form
    }

    /// Editable form fields
    pub fn form_mut(&mut self) -> &mut R::Form {
        self.form.fields_mut()
    }

    /// Last action error (delete failures)
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the current page
    pub async fn load(&self) -> Result<()> {
        self.list.refresh().await
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, item: &R::Item) {
        self.form.open_edit(R::id_of(item), R::form_from(item));
    }

    /// Discard the form
    pub fn cancel(&mut self) {
        self.form.reset();
    }

    /// Save the form, then re-read the list and close the form
    ///
    /// On failure the message is kept on the form, which stays open.
    pub async fn submit(&mut self) -> Result<()> {
        if !self.form.is_open() {
            return Err(Error::general("No form is open"));
        }

        self.form.begin_save();
        let result = match self.form.mode() {
            FormMode::Create => self.list.source().create(self.form.fields()).await,
            FormMode::Edit(id) => self.list.source().update(id, self.form.fields()).await,
        };

        if let Err(err) = result {
            self.form.fail(err.to_string());
            return Err(err);
        }

        if let Err(err) = self.list.refresh().await {
            warn!("Saved, but reloading the list failed: {}", err);
        }
        self.form.reset();
        Ok(())
    }

    /// First step of deletion; nothing is sent yet
    pub fn request_delete(&mut self, id: R::Id) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<R::Id> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the record awaiting confirmation, then re-read the list
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let id = self
            .pending_delete
            .take()
            .ok_or_else(|| Error::general("No deletion is awaiting confirmation"))?;

        self.error = None;
        if let Err(err) = self.list.source().remove(id).await {
            self.error = Some(err.to_string());
            return Err(err);
        }

        if let Err(err) = self.list.refresh().await {
            warn!("Deleted {:?}, but reloading the list failed: {}", id, err);
        }
        Ok(())
    }
}
