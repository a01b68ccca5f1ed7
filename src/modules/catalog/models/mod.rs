mod product;

pub use product::{
    Category, CreateCategoryRequest, CreateProductRequest, Product, StockAdjustmentRequest,
    UpdateProductRequest,
};
