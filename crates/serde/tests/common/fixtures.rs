//! Record fixtures.
//!
//! Each type carries a hand-written descriptor table, the way generated
//! bindings do.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use xmlbind_model::{
    AnyContent, AttributeMap, FieldMeta, Namespace, Record, RecordMeta, Value,
};

pub const SHOP: &str = "urn:example:shop";

static PRODUCT: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("product")
        .field(FieldMeta::element("number"))
        .field(FieldMeta::element("name"))
        .field(FieldMeta::element("size"))
        .field(FieldMeta::element("color"))
});

static NILLABLE_PRODUCT: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("product")
        .field(FieldMeta::element("number"))
        .field(FieldMeta::element("name"))
        .field(FieldMeta::element("size"))
        .field(FieldMeta::element("color").nillable())
});

/// `size` is either a number or a label such as `"XL"`.
#[derive(Debug, Clone)]
pub enum Size {
    Number(i32),
    Label(String),
}

#[derive(Debug, Clone)]
pub struct Product {
    pub number: i32,
    pub name: String,
    pub size: Option<Size>,
    pub color: Option<String>,
    pub nillable_color: bool,
}

impl Product {
    pub fn shirt() -> Self {
        Self {
            number: 1,
            name: "Shirt".to_string(),
            size: Some(Size::Number(10)),
            color: None,
            nillable_color: false,
        }
    }
}

impl Record for Product {
    fn meta(&self) -> &RecordMeta {
        if self.nillable_color {
            &NILLABLE_PRODUCT
        } else {
            &PRODUCT
        }
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => Some(self.number.into()),
            1 => Some((&self.name).into()),
            2 => self.size.as_ref().map(|size| match size {
                Size::Number(n) => Value::from(*n),
                Size::Label(label) => Value::from(label),
            }),
            3 => self.color.as_ref().map(Value::from),
            _ => None,
        }
    }
}

static LINE: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("line")
        .with_namespace(SHOP)
        .field(FieldMeta::attribute("sku"))
        .field(FieldMeta::element("quantity").with_namespace(SHOP))
        .field(FieldMeta::element("price").with_namespace(SHOP))
        .field(FieldMeta::element("shipped").with_namespace(SHOP))
});

#[derive(Debug, Clone)]
pub struct Line {
    pub sku: String,
    pub quantity: u32,
    pub price: Decimal,
    pub shipped: Option<NaiveDate>,
}

impl Record for Line {
    fn meta(&self) -> &RecordMeta {
        &LINE
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => Some((&self.sku).into()),
            1 => Some(self.quantity.into()),
            2 => Some(self.price.into()),
            3 => self.shipped.map(Value::from),
            _ => None,
        }
    }
}

static ORDER: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("order")
        .with_namespace(SHOP)
        .field(FieldMeta::attribute("id"))
        .field(FieldMeta::attribute("lang").with_namespace(Namespace::Xml.uri()))
        .field(FieldMeta::element("line").with_namespace(SHOP))
        .field(FieldMeta::element("note").with_namespace("urn:example:notes"))
});

#[derive(Debug, Clone)]
pub struct Order {
    pub id: u64,
    pub lang: Option<String>,
    pub lines: Vec<Line>,
    pub note: Option<String>,
}

impl Record for Order {
    fn meta(&self) -> &RecordMeta {
        &ORDER
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => Some(self.id.into()),
            1 => self.lang.as_ref().map(Value::from),
            2 => (!self.lines.is_empty()).then(|| Value::records(&self.lines)),
            3 => self.note.as_ref().map(Value::from),
            _ => None,
        }
    }
}

pub fn sample_order() -> Order {
    Order {
        id: 42,
        lang: Some("en".to_string()),
        lines: vec![
            Line {
                sku: "A-1".to_string(),
                quantity: 2,
                price: Decimal::new(1050, 2),
                shipped: NaiveDate::from_ymd_opt(2024, 3, 1),
            },
            Line {
                sku: "B-2".to_string(),
                quantity: 1,
                price: Decimal::new(300, 0),
                shipped: None,
            },
        ],
        note: Some("fragile".to_string()),
    }
}

static PARAGRAPH: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("p")
        .field(FieldMeta::wildcard_attributes("attributes"))
        .field(FieldMeta::wildcard("content"))
});

/// Open content: mixed text and arbitrary elements.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub attributes: AttributeMap,
    pub content: Vec<AnyContent>,
}

impl Record for Paragraph {
    fn meta(&self) -> &RecordMeta {
        &PARAGRAPH
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => (!self.attributes.is_empty()).then_some(Value::Attributes(&self.attributes)),
            1 => (!self.content.is_empty()).then(|| Value::any(&self.content)),
            _ => None,
        }
    }
}

static SPAN: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("span")
        .field(FieldMeta::attribute("class"))
        .field(FieldMeta::text("value").nillable())
});

/// Simple content: attributes plus text.
#[derive(Debug, Clone, Default)]
pub struct Span {
    pub class: Option<String>,
    pub value: Option<String>,
}

impl Record for Span {
    fn meta(&self) -> &RecordMeta {
        &SPAN
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => self.class.as_ref().map(Value::from),
            1 => self.value.as_ref().map(Value::from),
            _ => None,
        }
    }
}

static LABELLED: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("labelled").field(FieldMeta::text("label"))
});

/// A text field that wrongly holds a record.
#[derive(Debug, Clone)]
pub struct Labelled {
    pub label: Span,
}

impl Record for Labelled {
    fn meta(&self) -> &RecordMeta {
        &LABELLED
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => Some(Value::record(&self.label)),
            _ => None,
        }
    }
}

static WRAPPER: LazyLock<RecordMeta> = LazyLock::new(|| {
    RecordMeta::new("wrapper")
        .field(FieldMeta::element("name"))
        .field(FieldMeta::element("labelled"))
});

/// A valid record whose nested record is invalid.
#[derive(Debug, Clone)]
pub struct Wrapper {
    pub name: String,
    pub labelled: Labelled,
}

impl Record for Wrapper {
    fn meta(&self) -> &RecordMeta {
        &WRAPPER
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => Some((&self.name).into()),
            1 => Some(Value::record(&self.labelled)),
            _ => None,
        }
    }
}

static CHAIN: LazyLock<RecordMeta> =
    LazyLock::new(|| RecordMeta::new("chain").field(FieldMeta::element("next")));

/// A linked list, for recursion depth tests.
#[derive(Debug, Clone)]
pub struct Chain {
    pub next: Option<Box<Chain>>,
}

impl Chain {
    pub fn with_length(length: usize) -> Self {
        (1..length).fold(Chain { next: None }, |tail, _| Chain {
            next: Some(Box::new(tail)),
        })
    }
}

impl Record for Chain {
    fn meta(&self) -> &RecordMeta {
        &CHAIN
    }

    fn value(&self, index: usize) -> Option<Value<'_>> {
        match index {
            0 => self.next.as_ref().map(|next| Value::Composite(&**next)),
            _ => None,
        }
    }
}
