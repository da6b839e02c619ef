// ── API → domain conversions ──

use shoely_api::{Shoe, ShoeId, ShoeWrite};

use crate::model::{NewProduct, Product, ProductId};

impl From<Shoe> for Product {
    fn from(shoe: Shoe) -> Self {
        Self {
            id: ProductId::from(shoe.id),
            name: shoe.name,
            code: shoe.code,
            price: shoe.price,
            size: shoe.size,
        }
    }
}

impl From<ShoeId> for ProductId {
    fn from(id: ShoeId) -> Self {
        Self::new(id.as_str())
    }
}

impl From<&ProductId> for ShoeId {
    fn from(id: &ProductId) -> Self {
        ShoeId::new(id.as_str())
    }
}

impl From<&NewProduct> for ShoeWrite {
    fn from(product: &NewProduct) -> Self {
        Self {
            name: product.name.clone(),
            code: product.code.clone(),
            price: product.price,
            size: product.size.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn shoe_converts_field_by_field() {
        let shoe = Shoe {
            id: ShoeId::from(1),
            name: "Air".into(),
            code: "A1".into(),
            price: 100.0,
            size: "42".into(),
        };
        let product = Product::from(shoe);
        assert_eq!(product.id, ProductId::from("1"));
        assert_eq!(product.name, "Air");
        assert_eq!(product.code, "A1");
        assert_eq!(product.price, 100.0);
        assert_eq!(product.size, "42");
    }

    #[test]
    fn product_id_round_trips_to_wire_id() {
        let id = ProductId::from("abc");
        assert_eq!(ShoeId::from(&id).as_str(), "abc");
    }
}
