use serde::Deserialize;

use crate::document::{self, Document};
use crate::error::{CoreError, TickError};
use crate::types::{DisconnectNotice, QuoteEvent};

/// Тип сообщения стрима
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// keep-alive и всё незнакомое
    Heartbeat,
    /// котировка
    Tick(QuoteEvent),
    /// вендор закрывает сессию
    Disconnect(DisconnectNotice),
}

/// Классифицирует документ. Порядок проверок:
/// 1. `disconnect` - объект -> [`Message::Disconnect`]
/// 2. `tick` - не объект или отсутствует -> [`Message::Heartbeat`]
/// 3. `tick` - объект без валидных `time`/`bid`/`ask` -> ошибка
///
/// Незнакомые сообщения молча пропускаем, а кривой тик - нет.
pub fn classify(doc: &Document) -> Result<Message, TickError> {
    if let Some(obj) = doc.object("disconnect") {
        return Ok(Message::Disconnect(DisconnectNotice::from_object(obj)));
    }

    let Some(tick) = doc.get("tick").filter(|v| v.is_object()) else {
        return Ok(Message::Heartbeat);
    };

    let quote = QuoteEvent::deserialize(tick).map_err(TickError::Payload)?;
    Ok(Message::Tick(quote))
}

/// Разбор записи и классификация за один шаг
pub fn decode(record: &[u8]) -> Result<Message, CoreError> {
    let doc = document::parse(record)?;
    Ok(classify(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    fn classify_str(s: &str) -> Result<Message, TickError> {
        classify(&parse(s.as_bytes()).unwrap())
    }

    #[test]
    fn tick_is_extracted() {
        let msg = classify_str(
            r#"{"tick":{"instrument":"USD_JPY","time":"1420070400123456","bid":120.123,"ask":120.156}}"#,
        )
        .unwrap();

        assert_eq!(
            msg,
            Message::Tick(QuoteEvent {
                time: "1420070400123456".to_string(),
                bid: 120.123,
                ask: 120.156,
                instrument: Some("USD_JPY".to_string()),
            })
        );
    }

    #[test]
    fn integer_prices_are_accepted() {
        let msg = classify_str(r#"{"tick":{"time":"1420070400","bid":120,"ask":121}}"#).unwrap();
        match msg {
            Message::Tick(q) => {
                assert_eq!(q.bid, 120.0);
                assert_eq!(q.ask, 121.0);
                assert_eq!(q.instrument, None);
            }
            other => panic!("expected tick, got {other:?}"),
        }
    }

    #[test]
    fn heartbeat_and_unknown_messages_are_ignored() {
        for s in [
            r#"{"heartbeat":{"time":"1420070400000000"}}"#,
            r#"{}"#,
            r#"{"tick":"not an object"}"#,
            r#"{"tick":null}"#,
            r#"{"disconnect":"soon"}"#,
            r#"{"something_new":{"a":1}}"#,
        ] {
            assert_eq!(classify_str(s).unwrap(), Message::Heartbeat, "{s}");
        }
    }

    #[test]
    fn disconnect_wins_over_tick() {
        let msg = classify_str(
            r#"{"disconnect":{"code":60,"message":"Access Token connection limit exceeded"},"tick":{}}"#,
        )
        .unwrap();

        match msg {
            Message::Disconnect(n) => {
                assert_eq!(n.code, Some(60));
                assert_eq!(
                    n.message.as_deref(),
                    Some("Access Token connection limit exceeded")
                );
            }
            other => panic!("expected disconnect, got {other:?}"),
        }
    }

    #[test]
    fn decode_reports_which_stage_failed() {
        assert!(matches!(decode(b"{oops"), Err(CoreError::Document(_))));
        assert!(matches!(
            decode(br#"{"tick":{"time":"1"}}"#),
            Err(CoreError::Tick(_))
        ));
        assert_eq!(decode(br#"{"heartbeat":{}}"#).unwrap(), Message::Heartbeat);
    }

    #[test]
    fn malformed_tick_is_an_error() {
        for s in [
            r#"{"tick":{"time":"1420070400"}}"#,
            r#"{"tick":{"time":1420070400,"bid":1.0,"ask":1.1}}"#,
            r#"{"tick":{"time":"1420070400","bid":"1.0","ask":1.1}}"#,
            r#"{"tick":{"bid":1.0,"ask":1.1}}"#,
        ] {
            assert!(
                matches!(classify_str(s), Err(TickError::Payload(_))),
                "{s} must be rejected"
            );
        }
    }

    #[test]
    fn odd_instrument_field_does_not_reject_tick() {
        let msg =
            classify_str(r#"{"tick":{"instrument":5,"time":"1420070400","bid":120.1,"ask":120.2}}"#)
                .unwrap();
        match msg {
            Message::Tick(ev) => {
                assert_eq!(ev.instrument, None);
                assert_eq!(ev.bid, 120.1);
                assert_eq!(ev.ask, 120.2);
            }
            other => panic!("expected tick, got {other:?}"),
        }
    }
}
