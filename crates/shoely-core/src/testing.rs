// In-memory collaborators for controller and editor tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::oneshot;

use crate::error::CoreError;
use crate::host::{Choice, ConfirmPrompt, Host, Notice, Route};
use crate::model::{NewProduct, Product, ProductId};
use crate::service::ProductService;

type ListResult = Result<Vec<Product>, CoreError>;

enum Scripted {
    Ready(ListResult),
    Gated(oneshot::Receiver<ListResult>),
}

/// `{id:1, tenSanPham:"Air", maSanPham:"A1", giaSanPham:100, size:"42"}`
pub(crate) fn air() -> Product {
    Product {
        id: ProductId::from("1"),
        name: "Air".into(),
        code: "A1".into(),
        price: 100.0,
        size: "42".into(),
    }
}

/// Scripted product service. List responses are served in push order;
/// an empty script answers with an empty list.
#[derive(Default)]
pub(crate) struct FakeService {
    script: Mutex<VecDeque<Scripted>>,
    list_calls: AtomicUsize,
    fail_writes: AtomicBool,
    deleted: Mutex<Vec<ProductId>>,
    created: Mutex<Vec<NewProduct>>,
    updated: Mutex<Vec<(ProductId, NewProduct)>>,
}

impl FakeService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_list(&self, result: ListResult) {
        self.script.lock().unwrap().push_back(Scripted::Ready(result));
    }

    /// Queue a list response that resolves when the returned sender fires.
    pub(crate) fn push_gated(&self) -> oneshot::Sender<ListResult> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn deleted(&self) -> Vec<ProductId> {
        self.deleted.lock().unwrap().clone()
    }

    pub(crate) fn created(&self) -> Vec<NewProduct> {
        self.created.lock().unwrap().clone()
    }

    pub(crate) fn updated(&self) -> Vec<(ProductId, NewProduct)> {
        self.updated.lock().unwrap().clone()
    }

    fn write_error(&self) -> Option<CoreError> {
        self.fail_writes.load(Ordering::SeqCst).then(|| CoreError::Api {
            message: "500 Internal Server Error".into(),
            status: Some(500),
        })
    }
}

fn stored(id: ProductId, product: &NewProduct) -> Product {
    Product {
        id,
        name: product.name.clone(),
        code: product.code.clone(),
        price: product.price,
        size: product.size.clone(),
    }
}

impl ProductService for FakeService {
    async fn list_products(&self) -> ListResult {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            None => Ok(Vec::new()),
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(CoreError::Internal("gate dropped".into()))),
        }
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), CoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        self.deleted.lock().unwrap().push(id.clone());
        Ok(())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, CoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        let mut created = self.created.lock().unwrap();
        created.push(product.clone());
        Ok(stored(ProductId::new(created.len().to_string()), product))
    }

    async fn update_product(&self, id: &ProductId, product: &NewProduct) -> Result<Product, CoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        self.updated
            .lock()
            .unwrap()
            .push((id.clone(), product.clone()));
        Ok(stored(id.clone(), product))
    }
}

/// Host that records every call and answers prompts with a fixed choice.
pub(crate) struct RecordingHost {
    choice: Choice,
    prompts: Mutex<Vec<ConfirmPrompt>>,
    notices: Mutex<Vec<Notice>>,
    routes: Mutex<Vec<Route>>,
    backs: AtomicUsize,
}

impl RecordingHost {
    fn answering(choice: Choice) -> Self {
        Self {
            choice,
            prompts: Mutex::default(),
            notices: Mutex::default(),
            routes: Mutex::default(),
            backs: AtomicUsize::new(0),
        }
    }

    pub(crate) fn confirming() -> Self {
        Self::answering(Choice::Confirm)
    }

    pub(crate) fn cancelling() -> Self {
        Self::answering(Choice::Cancel)
    }

    pub(crate) fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub(crate) fn backs(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Host for RecordingHost {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    fn go_back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> Choice {
        self.prompts.lock().unwrap().push(prompt);
        self.choice
    }
}
