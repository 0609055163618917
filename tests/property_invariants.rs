use proptest::prelude::*;

use qson::{
    cabrillo::{cabrillo_to_qson, headers::HeaderValue},
    types::FieldValue,
};

#[derive(Debug, Clone)]
struct Line {
    cross: bool,
    minute: u16,
    serial: u16,
    call_idx: u8,
}

fn line_strategy() -> impl Strategy<Value = Line> {
    (any::<bool>(), 0u16..2880, 1u16..2000, 0u8..50).prop_map(|(cross, minute, serial, call_idx)| Line {
        cross,
        minute,
        serial,
        call_idx,
    })
}

fn render(contest: &str, soapbox: &[String], lines: &[Line]) -> String {
    let mut text = format!("START-OF-LOG: 3.0\nCONTEST: {contest}\nCALLSIGN: K1ABC\n");
    for note in soapbox {
        text.push_str(&format!("SOAPBOX: {note}\n"));
    }
    for line in lines {
        let day = 25 + line.minute / 1440;
        let hhmm = format!("{:02}{:02}", (line.minute % 1440) / 60, line.minute % 60);
        let tag = if line.cross { "X-QSO" } else { "QSO" };
        text.push_str(&format!(
            "{tag}: 14025 CW 2023-03-{day} {hhmm} K1ABC 599 {} K{}AA 599 {}\n",
            line.serial, line.call_idx, line.serial
        ));
    }
    text.push_str("END-OF-LOG:\n");
    text
}

proptest! {
    #[test]
    fn qsos_sorted_cross_qsos_in_file_order(lines in prop::collection::vec(line_strategy(), 0..80)) {
        let doc = cabrillo_to_qson(&render("CQ-WPX-CW", &[], &lines));

        prop_assert_eq!(doc.qso_count(), lines.len());
        prop_assert!(doc.qsos.windows(2).all(|w| w[0].start_millis <= w[1].start_millis));
        // Ties keep appearance order.
        prop_assert!(doc.qsos.windows(2).all(|w| w[0].start_millis < w[1].start_millis || w[0].number < w[1].number));
        prop_assert!(doc.qsos_other.windows(2).all(|w| w[0].number < w[1].number && w[0].line < w[1].line));

        let expected_cross: Vec<String> = lines
            .iter()
            .filter(|l| l.cross)
            .map(|l| format!("K{}AA", l.call_idx))
            .collect();
        let cross: Vec<String> = doc.qsos_other.iter().map(|q| q.their.call.clone()).collect();
        prop_assert_eq!(cross, expected_cross);
    }

    #[test]
    fn sent_copies_match_exchange_and_values_are_typed(lines in prop::collection::vec(line_strategy(), 1..40)) {
        let doc = cabrillo_to_qson(&render("CQ-WPX-CW", &[], &lines));
        for qso in doc.qsos.iter().chain(doc.qsos_other.iter()) {
            prop_assert_eq!(&qso.our.fields, &qso.our.sent);
            prop_assert_eq!(&qso.their.fields, &qso.their.sent);
            prop_assert!(matches!(qso.our.get("serial"), Some(FieldValue::Number(_))));
            prop_assert_eq!(qso.their.get("rst"), Some(&FieldValue::text("599")));
        }
    }

    #[test]
    fn parse_is_idempotent_and_keeps_list_headers(
        lines in prop::collection::vec(line_strategy(), 0..20),
        soapbox in prop::collection::vec("[A-Z]{1,8}( [A-Z0-9]{1,8})?", 0..5),
    ) {
        let text = render("NY-QSO-PARTY", &soapbox, &lines);
        let first = cabrillo_to_qson(&text);
        let second = cabrillo_to_qson(&text);
        prop_assert_eq!(&first, &second);

        match first.raw_headers.get("soapbox") {
            None => prop_assert!(soapbox.is_empty()),
            Some(HeaderValue::List(items)) => prop_assert_eq!(items, &soapbox),
            Some(other) => prop_assert!(false, "unexpected soapbox value: {other:?}"),
        }
    }
}
