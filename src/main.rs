// --- Normalizador de horarios - Archivo principal ---

use anyhow::{Context, Result};
use clap::Parser;
use timetable_flat::{Config, run};

fn main() -> Result<()> {
    // .env opcional con TIMETABLE_PERIODS / TIMETABLE_LOOKUPS_DIR / RUST_LOG
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    println!("=== Normalizador de horarios ===");
    println!("Entrada: {}", config.input.display());
    println!("Salida: {}", config.output.display());
    println!("Periodos: {}", config.periods);

    let report = run(&config).with_context(|| format!("no se pudo convertir '{}'", config.input.display()))?;

    println!(
        "Convertidos {} registros de origen en {} registros planos ({} omitidos).",
        report.processed, report.summary.total_records, report.skipped
    );
    print!("{}", report.summary);

    if let Some((professors, classrooms)) = &report.lookups {
        println!("Índices escritos: {} y {}", professors.display(), classrooms.display());
    }

    if let Some(coverage) = &report.coverage {
        println!(
            "Cobertura: {} filas (mínimo {}), {} sesiones comprobadas, {} códigos faltantes, {} códigos inesperados",
            coverage.emitted_records,
            coverage.min_expected_records(),
            coverage.checked_slots,
            coverage.missing_codes.len(),
            coverage.unexpected_codes.len()
        );
        for code in coverage.missing_codes.iter().take(20) {
            println!("  - falta: {}", code);
        }
        for problem in coverage.time_mismatches.iter().chain(&coverage.inverted_spans).take(20) {
            println!("  - horario: {}", problem);
        }
        if coverage.is_consistent() {
            println!("✅ Salida consistente con la fuente");
        } else {
            anyhow::bail!("la salida no es consistente con la fuente");
        }
    }

    Ok(())
}
