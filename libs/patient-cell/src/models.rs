use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterPatientRequest {
    pub ic_number: String,
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatientRequest {
    pub ic_number: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
}
