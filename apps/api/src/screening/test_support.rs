//! Shared fixtures for screening tests: embedders with known outputs and a
//! builder for small text PDFs.

use std::collections::HashMap;
use std::sync::Mutex;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::screening::embedder::{EmbedError, Embedder, Embedding};

/// A 2-d unit vector whose cosine against `[1, 0]` is exactly `cos`.
pub fn unit_at(cos: f32) -> Embedding {
    vec![cos, (1.0 - cos * cos).sqrt()]
}

/// Maps known texts to fixed vectors; unknown text is an encode error.
pub struct FixedEmbedder {
    vectors: HashMap<String, Embedding>,
}

impl FixedEmbedder {
    pub fn new(entries: &[(&str, Embedding)]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, v)| (text.to_string(), v.clone()))
                .collect(),
        }
    }
}

impl Embedder for FixedEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        texts
            .iter()
            .map(|t| {
                self.vectors
                    .get(*t)
                    .cloned()
                    .ok_or_else(|| EmbedError::Encode(format!("no vector for {t:?}")))
            })
            .collect()
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

/// Wraps another embedder and records every call and every text it sees.
pub struct CountingEmbedder<E> {
    inner: E,
    calls: Mutex<usize>,
    texts: Mutex<Vec<String>>,
}

impl<E: Embedder> CountingEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Mutex::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl<E: Embedder> Embedder for CountingEmbedder<E> {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        *self.calls.lock().unwrap() += 1;
        self.texts
            .lock()
            .unwrap()
            .extend(texts.iter().map(|t| t.to_string()));
        self.inner.embed(texts)
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

/// Builds a PDF with one page per entry. An empty entry produces a page with
/// no text operators, like a scanned image without an OCR layer.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize test pdf");
    bytes
}
