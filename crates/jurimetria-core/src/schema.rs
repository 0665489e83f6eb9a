/// Arrow schema for the per-case study report.
pub mod report {
    use arrow::datatypes::{DataType, Field, Schema};

    /// Identity and party columns, in report order.
    pub const IDENTITY: &[&str] = &[
        "Processo",
        "Status",
        "Classe",
        "Assunto",
        "Foro",
        "Vara",
        "Juiz",
        "Requerente",
        "Advogados",
        "Interessados",
        "Credores",
        "Perito/Administrador",
    ];

    /// One column per research question, Q1 first.
    pub const QUESTIONS: &[&str] = &[
        "Q1 - Bancos/Veículos",
        "Q2 - Pedidos",
        "Q3 - Garantias Extraconcursais",
        "Q4 - Essencialidade",
        "Q5 - Teses",
        "Q6 - Entendimento Tribunal",
        "Q7 - Escritório",
        "Q8 - Crédito Extraconcursal",
        "Q9 - Recursos",
        "Q10 - Bens vs Busca/Apreensão",
        "Q11 - Stay Period",
        "Q12 - Executar Garantias",
        "Q13 - Plano RJ",
        "Q14 - AGC/Mediação",
    ];

    pub const ERROR: &str = "Erro";

    /// All report columns in order.
    pub fn columns() -> impl Iterator<Item = &'static str> {
        IDENTITY
            .iter()
            .chain(QUESTIONS.iter())
            .copied()
            .chain(std::iter::once(ERROR))
    }

    /// Schema for the report: every column is Utf8. `Processo` and `Status`
    /// are always set; answers are null for cases that were not classified.
    pub fn report_schema() -> Schema {
        Schema::new(
            columns()
                .map(|name| {
                    let nullable = !matches!(name, "Processo" | "Status");
                    Field::new(name, DataType::Utf8, nullable)
                })
                .collect::<Vec<_>>(),
        )
    }
}
