use serde::{ Serialize, Deserialize };

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GenerateRequest {
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub id: String,
    pub summary: String,
}
