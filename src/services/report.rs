use crate::model::label::Label;

pub const REPORT_HEADER: &str = "A imagem tem \n";

/// Uma linha por rótulo: `"<confiança>% de ser do tipo <nome>"`.
///
/// `translated` e `labels` são pareados por índice; o menor define o tamanho.
pub fn format(translated: &[String], labels: &[Label]) -> String {
    translated
        .iter()
        .zip(labels)
        .map(|(name, label)| format!("{:.2}% de ser do tipo {}", round_half_up(label.confidence), name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Empates em duas casas sobem (80.125 -> 80.13); `{:.2}` sozinho arredonda para o par.
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn body(report: &str) -> String {
    format!("{REPORT_HEADER}{report}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_two_decimals() {
        let out = format(
            &["Gato".to_string(), "Cachorro".to_string(), "Pássaro".to_string()],
            &[
                Label::new("Cat", 81.0),
                Label::new("Dog", 95.5),
                Label::new("Bird", 99.123456),
            ],
        );

        assert_eq!(
            out,
            "81.00% de ser do tipo Gato\n95.50% de ser do tipo Cachorro\n99.12% de ser do tipo Pássaro"
        );
    }

    #[test]
    fn ties_round_up() {
        let out = format(
            &["Gato".to_string(), "Cachorro".to_string(), "Pássaro".to_string()],
            &[
                Label::new("Cat", 80.125),
                Label::new("Dog", 90.625),
                Label::new("Bird", 95.375),
            ],
        );

        assert_eq!(
            out,
            "80.13% de ser do tipo Gato\n90.63% de ser do tipo Cachorro\n95.38% de ser do tipo Pássaro"
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(format(&[], &[]), "");
        assert_eq!(body(""), "A imagem tem \n");
    }

    #[test]
    fn body_prefixes_header() {
        let report = format(&["Gato".to_string()], &[Label::new("Cat", 95.5)]);
        assert_eq!(body(&report), "A imagem tem \n95.50% de ser do tipo Gato");
    }
}
