use shared::errors::ServiceError;
use std::{fmt, str::FromStr};

/// REST collections the dashboard works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Pis,
    Campanhas,
    Agencias,
    Anunciantes,
    Executivos,
    Produtos,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Pis,
        Resource::Campanhas,
        Resource::Agencias,
        Resource::Anunciantes,
        Resource::Executivos,
        Resource::Produtos,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Pis => "/pis",
            Resource::Campanhas => "/campanhas",
            Resource::Agencias => "/agencias",
            Resource::Anunciantes => "/anunciantes",
            Resource::Executivos => "/executivos",
            Resource::Produtos => "/produtos",
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(id.trim()))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}

impl FromStr for Resource {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pis" | "pi" => Ok(Resource::Pis),
            "campanhas" | "campanha" | "campaigns" => Ok(Resource::Campanhas),
            "agencias" | "agencia" | "agencies" => Ok(Resource::Agencias),
            "anunciantes" | "anunciante" | "advertisers" => Ok(Resource::Anunciantes),
            "executivos" | "executivo" | "executives" => Ok(Resource::Executivos),
            "produtos" | "produto" | "products" => Ok(Resource::Produtos),
            other => Err(ServiceError::UnknownResource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(format!("Invalid export format: {other}")),
        }
    }
}
