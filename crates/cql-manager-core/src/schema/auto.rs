/// How a column is populated when a record is created without a value for
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auto {
    /// A random (v4) UUID.
    Uuid,
}

impl Auto {
    /// Generates a fresh value for a column of type `ty`.
    pub fn generate(self, ty: &super::Type) -> crate::Result<crate::stmt::Value> {
        match self {
            Auto::Uuid => crate::stmt::Value::Uuid(uuid::Uuid::new_v4()).cast(ty),
        }
    }
}
