use fattura::fiscale::{validate_codice_fiscale, validate_partita_iva};

fn main() {
    let partite_iva = [
        "12345678903",
        "IT 01114601006",
        "12345678901",
        "00000000000",
    ];

    println!("Partite IVA:");
    for input in partite_iva {
        match validate_partita_iva(input) {
            Ok(cleaned) => println!("  {input:>15} -> valida ({cleaned})"),
            Err(err) => println!("  {input:>15} -> {err}"),
        }
    }

    let codici_fiscali = [
        "RSSMRA85T10A562S",
        "mrtmtt91d08f205j",
        "RSSMRA85T10A56NH",
        "RSSMRA85T10A562T",
    ];

    println!("Codici fiscali:");
    for input in codici_fiscali {
        match validate_codice_fiscale(input) {
            Ok(cleaned) => println!("  {input:>17} -> valido ({cleaned})"),
            Err(err) => println!("  {input:>17} -> {err}"),
        }
    }
}
