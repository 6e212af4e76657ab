#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use product_insight::catalog::api::{CatalogEnvelope, CatalogItem, ProductCatalog};
use product_insight::catalog::IdentityResolver;
use product_insight::config::ProviderConfig;
use product_insight::food::api::{
    FoodDetail, FoodHit, FoodNutrient, FoodSearch, FoodSearchPage, NutrientInfo, NutritionDatabase,
};
use product_insight::food::NutritionLookup;
use product_insight::http::Fetched;
use product_insight::medicine::api::{LabelDatabase, LabelEntry, LabelPage};
use product_insight::medicine::LabelLookup;
use product_insight::pipeline::{AnalysisStage, Pipeline, SourceSelector};
use product_insight::providers::traits::CompletionProvider;
use product_insight::{PipelineError, Service};

#[derive(Default)]
pub struct MockCatalog {
    pub titles: HashMap<String, String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ProductCatalog for MockCatalog {
    async fn lookup(&self, code: &str) -> Result<Fetched<CatalogEnvelope>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Fetched::Found(match self.titles.get(code) {
            Some(title) => CatalogEnvelope {
                code: "OK".to_string(),
                items: vec![CatalogItem { title: title.clone(), brand: None }],
            },
            None => CatalogEnvelope { code: "OK".to_string(), items: vec![] },
        }))
    }
}

#[derive(Default)]
pub struct MockUsda {
    /// Search query → (hit, detail nutrients)
    pub foods: HashMap<String, (FoodHit, Vec<FoodNutrient>)>,
    pub fail_search: bool,
    pub searches: AtomicUsize,
    pub details: AtomicUsize,
}

#[async_trait]
impl NutritionDatabase for MockUsda {
    async fn search(&self, search: &FoodSearch<'_>) -> Result<Fetched<FoodSearchPage>, PipelineError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(PipelineError::upstream(Service::Nutrition, "connection failed"));
        }
        let foods = self
            .foods
            .get(search.query)
            .map(|(hit, _)| vec![hit.clone()])
            .unwrap_or_default();
        Ok(Fetched::Found(FoodSearchPage { foods }))
    }

    async fn detail(&self, fdc_id: u64) -> Result<Fetched<FoodDetail>, PipelineError> {
        self.details.fetch_add(1, Ordering::SeqCst);
        let food_nutrients = self
            .foods
            .values()
            .find(|(hit, _)| hit.fdc_id == fdc_id)
            .map(|(_, nutrients)| nutrients.clone())
            .unwrap_or_default();
        Ok(Fetched::Found(FoodDetail { food_nutrients }))
    }
}

#[derive(Default)]
pub struct MockFda {
    pub labels: HashMap<String, LabelEntry>,
    pub queries: Mutex<Vec<String>>,
}

impl MockFda {
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelDatabase for MockFda {
    async fn search_brand(&self, brand_name: &str, _limit: u32) -> Result<Fetched<LabelPage>, PipelineError> {
        self.queries.lock().unwrap().push(brand_name.to_string());
        Ok(match self.labels.get(brand_name) {
            Some(entry) => Fetched::Found(LabelPage { results: vec![entry.clone()] }),
            None => Fetched::Status(404),
        })
    }
}

#[derive(Default)]
pub struct MockLlm {
    pub calls: AtomicUsize,
    pub fail: bool,
}

#[async_trait]
impl CompletionProvider for MockLlm {
    async fn new(_config: ProviderConfig) -> Result<Self> {
        Ok(Self::default())
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("service unavailable"));
        }
        if prompt.contains("rate it out of 5") {
            Ok("4.5 - Looks Good".to_string())
        } else {
            Ok("**Pros of product**\n* Tasty\n**Cons of product**\n* Sugary".to_string())
        }
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok("mock-model".to_string())
    }
}

pub fn nutrient(name: &str, amount: Option<f64>, unit: &str) -> FoodNutrient {
    FoodNutrient {
        nutrient: NutrientInfo { name: name.to_string(), unit_name: unit.to_string() },
        amount,
    }
}

pub fn cheerios_usda() -> MockUsda {
    let mut usda = MockUsda::default();
    usda.foods.insert(
        "Cheerios".to_string(),
        (
            FoodHit { fdc_id: 1001, description: Some("Cheerios".to_string()), brand_owner: None },
            vec![nutrient("Protein", Some(12.1), "g"), nutrient("Biotin", None, "mcg")],
        ),
    );
    usda
}

pub fn tylenol_fda() -> MockFda {
    let mut fda = MockFda::default();
    fda.labels.insert(
        "TYLENOL".to_string(),
        LabelEntry {
            active_ingredient: Some(vec!["Acetaminophen 500 mg".to_string()]),
            purpose: Some(vec!["Pain reliever/fever reducer".to_string()]),
            warnings: Some(vec!["Liver warning".to_string()]),
            ..Default::default()
        },
    );
    fda
}

pub struct Harness {
    pub catalog: Arc<MockCatalog>,
    pub usda: Arc<MockUsda>,
    pub fda: Arc<MockFda>,
    pub llm: Arc<MockLlm>,
    pub pipeline: Pipeline,
}

impl Harness {
    pub fn new(codes: &[(&str, &str)], usda: MockUsda, fda: MockFda, llm: MockLlm) -> Self {
        let catalog = Arc::new(MockCatalog {
            titles: codes.iter().map(|(c, t)| (c.to_string(), t.to_string())).collect(),
            ..Default::default()
        });
        let usda = Arc::new(usda);
        let fda = Arc::new(fda);
        let llm = Arc::new(llm);

        let pipeline = Pipeline::new(
            IdentityResolver::new(catalog.clone()),
            SourceSelector::new(NutritionLookup::new(usda.clone()), LabelLookup::new(fda.clone())),
            AnalysisStage::new(llm.clone(), Duration::from_secs(5)),
        );

        Self { catalog, usda, fda, llm, pipeline }
    }

    pub fn llm_calls(&self) -> usize {
        self.llm.calls.load(Ordering::SeqCst)
    }

    pub fn usda_searches(&self) -> usize {
        self.usda.searches.load(Ordering::SeqCst)
    }
}
