#![allow(dead_code)]

use async_trait::async_trait;
use crud_sdk::{
    CrudService, DataStore, Entity, FieldValue, Fields, GenericService, MemoryStore, MergeInto,
    StoreError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestModel {
    pub id: i64,
    pub name: String,
    pub nullable: Option<String>,
    pub unique_name: String,
}

impl Entity for TestModel {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Fields for TestModel {
    fn type_name(&self) -> &'static str {
        "TestModel"
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some((&self.name).into()),
            "nullable" => Some(self.nullable.clone().into()),
            "unique_name" => Some((&self.unique_name).into()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTestModelDto {
    pub id: i64,
    pub name: String,
    pub unique_name: String,
}

impl From<&TestModel> for GetTestModelDto {
    fn from(model: &TestModel) -> Self {
        GetTestModelDto {
            id: model.id,
            name: model.name.clone(),
            unique_name: model.unique_name.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTestModelDto {
    pub name: String,
    #[serde(default)]
    pub nullable: Option<String>,
    pub unique_name: String,
}

impl AddTestModelDto {
    pub fn new(name: &str, unique_name: &str) -> Self {
        AddTestModelDto {
            name: name.into(),
            nullable: None,
            unique_name: unique_name.into(),
        }
    }
}

impl Fields for AddTestModelDto {
    fn type_name(&self) -> &'static str {
        "AddTestModelDto"
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some((&self.name).into()),
            "nullable" => Some(self.nullable.clone().into()),
            "unique_name" => Some((&self.unique_name).into()),
            _ => None,
        }
    }
}

impl From<AddTestModelDto> for TestModel {
    fn from(dto: AddTestModelDto) -> Self {
        TestModel {
            id: 0,
            name: dto.name,
            nullable: dto.nullable,
            unique_name: dto.unique_name,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestModelDto {
    pub name: String,
    pub unique_name: String,
}

impl UpdateTestModelDto {
    pub fn new(name: &str, unique_name: &str) -> Self {
        UpdateTestModelDto {
            name: name.into(),
            unique_name: unique_name.into(),
        }
    }
}

impl Fields for UpdateTestModelDto {
    fn type_name(&self) -> &'static str {
        "UpdateTestModelDto"
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some((&self.name).into()),
            "unique_name" => Some((&self.unique_name).into()),
            _ => None,
        }
    }
}

impl MergeInto<TestModel> for UpdateTestModelDto {
    fn merge_into(self, target: &mut TestModel) {
        target.name = self.name;
        target.unique_name = self.unique_name;
    }
}

pub type TestService = CrudService<TestModel, GetTestModelDto, AddTestModelDto, UpdateTestModelDto>;
pub type DynTestService =
    Arc<dyn GenericService<GetTestModelDto, AddTestModelDto, UpdateTestModelDto>>;

pub fn seed() -> Vec<TestModel> {
    vec![
        TestModel {
            id: 1,
            name: "TestModel1".into(),
            nullable: None,
            unique_name: "TestModel1".into(),
        },
        TestModel {
            id: 2,
            name: "TestModel2".into(),
            nullable: None,
            unique_name: "TestModel2".into(),
        },
        TestModel {
            id: 3,
            name: "TestModel3".into(),
            nullable: None,
            unique_name: String::new(),
        },
    ]
}

pub fn seeded_store() -> Arc<MemoryStore<TestModel>> {
    Arc::new(MemoryStore::with_seed(seed()))
}

pub fn service_over(store: Arc<MemoryStore<TestModel>>) -> TestService {
    TestService::new(store)
}

pub fn seeded_service() -> DynTestService {
    Arc::new(service_over(seeded_store()))
}

/// Store whose every call fails, for the unexpected-error paths.
pub struct FailingStore;

#[async_trait]
impl DataStore<TestModel> for FailingStore {
    async fn all(&self) -> Result<Vec<TestModel>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn insert(&self, _model: TestModel) -> Result<TestModel, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn save(&self, _model: &TestModel) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn remove(&self, _id: i64) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}
