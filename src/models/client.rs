use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecord {
    pub id: u64,
    pub nombre: String,
    #[serde(default)]
    pub especie: String,
    #[serde(default)]
    pub raza: String,
}

impl PetRecord {
    pub fn label(&self) -> String {
        let raza = self.raza.trim();
        if raza.is_empty() {
            self.especie.clone()
        } else {
            format!("{} - {}", self.especie, raza)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: u64,
    pub nombre_completo: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub mascotas: Vec<PetRecord>,
}

impl ClientRecord {
    pub fn pet(&self, pet_id: u64) -> Option<&PetRecord> {
        self.mascotas.iter().find(|pet| pet.id == pet_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSearchResponse {
    #[serde(default)]
    pub clientes: Vec<ClientRecord>,
}

/// Body of the per-client pets endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientPetsResponse {
    pub success: bool,
    #[serde(default)]
    pub cliente: Option<ClientRecord>,
    #[serde(default)]
    pub mascotas: Vec<PetRecord>,
    #[serde(default)]
    pub error: Option<String>,
}
