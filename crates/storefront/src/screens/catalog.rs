//! Catalog grid with its product detail overlay.

use shopfront_core::{AddOutcome, Product, ProductId};

use super::Notice;
use crate::catalog::CatalogOutcome;
use crate::filters::{format_price, truncate_description};

/// Description length on grid cards.
pub const CARD_DESCRIPTION_LIMIT: usize = 60;

/// Where the catalog fetch stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Fetch in flight.
    Loading,
    /// Products are available.
    Loaded,
    /// The catalog has no products.
    Empty,
    /// The catalog could not be fetched.
    Failed(String),
}

/// State of the catalog screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub mounted: bool,
    pub status: CatalogStatus,
    pub products: Vec<Product>,
    /// Product shown in the detail overlay.
    pub overlay: Option<ProductId>,
    pub notice: Option<Notice>,
}

/// Inputs to the catalog screen.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// The catalog fetch finished.
    Fetched(CatalogOutcome),
    /// Open the detail overlay for a product.
    Open(ProductId),
    /// Close the detail overlay.
    Close,
    /// A product was saved to the cart.
    AddedToCart { id: ProductId, outcome: AddOutcome },
    /// Saving a product to the cart failed.
    AddFailed { id: ProductId },
    /// The screen was navigated away from.
    Unmount,
}

/// A product as shown on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl CatalogState {
    /// A freshly mounted screen waiting for its fetch.
    #[must_use]
    pub const fn mount() -> Self {
        Self {
            mounted: true,
            status: CatalogStatus::Loading,
            products: Vec::new(),
            overlay: None,
            notice: None,
        }
    }

    /// Apply `action` and return the next state.
    #[must_use]
    pub fn update(mut self, action: CatalogAction) -> Self {
        if !self.mounted {
            return self;
        }

        match action {
            CatalogAction::Fetched(outcome) => {
                let (status, products) = match outcome {
                    CatalogOutcome::Loaded(products) => (CatalogStatus::Loaded, products),
                    CatalogOutcome::Empty => (CatalogStatus::Empty, Vec::new()),
                    CatalogOutcome::Failed(reason) => (CatalogStatus::Failed(reason), Vec::new()),
                };
                self.status = status;
                self.products = products;
                self.overlay = None;
            }
            CatalogAction::Open(id) => {
                if self.product(id).is_some() {
                    self.overlay = Some(id);
                }
            }
            CatalogAction::Close => self.overlay = None,
            CatalogAction::AddedToCart { id, outcome } => {
                if let Some(title) = self.title_of(id) {
                    let quantity = match outcome {
                        AddOutcome::Inserted => 1,
                        AddOutcome::Incremented { quantity } => quantity,
                    };
                    self.notice = Some(Notice::Added { title, quantity });
                }
            }
            CatalogAction::AddFailed { id } => {
                if let Some(title) = self.title_of(id) {
                    self.notice = Some(Notice::AddFailed { title });
                }
            }
            CatalogAction::Unmount => {
                self.mounted = false;
                self.overlay = None;
            }
        }
        self
    }

    /// Whether the fetch is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, CatalogStatus::Loading)
    }

    /// Look up a listed product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The product in the detail overlay, if it is open.
    #[must_use]
    pub fn overlay_product(&self) -> Option<&Product> {
        self.overlay.and_then(|id| self.product(id))
    }

    /// Grid cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> Vec<ProductCard> {
        self.products
            .iter()
            .map(|p| ProductCard {
                id: p.id,
                title: p.title.clone(),
                description: truncate_description(&p.description, CARD_DESCRIPTION_LIMIT),
                price: format_price(&p.price),
                image: p.image.clone(),
            })
            .collect()
    }

    fn title_of(&self, id: ProductId) -> Option<String> {
        self.product(id).map(|p| p.title.clone())
    }
}
