//! Schema-tagged JSON uploads and downloads.

use super::{JSON_CONTENT_TYPE, StorageClient};
use crate::schema::{self, SCHEMA_REF_KEY, SchemaProvider};
use crate::{Error, ObjectMetadata, Result, TRACING_TARGET_SCHEMA};

impl StorageClient {
    /// Upload `object` as JSON, tagged with its schema name.
    ///
    /// The value is validated against its own schema first; a value that
    /// does not conform is never written.
    #[tracing::instrument(skip(self, object), target = TRACING_TARGET_SCHEMA)]
    pub async fn upload_json_schematized<T>(&self, bucket: &str, name: &str, object: &T) -> Result<()>
    where
        T: SchemaProvider,
    {
        schema::validate(object).map_err(|e| Error::schema_validation(bucket, name, e))?;
        let schema_ref =
            schema::schema_name(T::schema()).ok_or_else(|| Error::unnamed_schema(bucket, name))?;

        let data = serde_json::to_vec(object).map_err(|e| Error::serialization(bucket, name, e))?;

        let metadata = ObjectMetadata::new().with(SCHEMA_REF_KEY, schema_ref);
        self.upload(bucket, name, &mut data.as_slice(), Some(JSON_CONTENT_TYPE), metadata)
            .await
    }

    /// Download a JSON object previously stored by
    /// [`upload_json_schematized`](Self::upload_json_schematized).
    ///
    /// The stored schema tag must equal `T`'s schema name; otherwise the call
    /// fails before the body is read. The decoded value is validated against
    /// the schema again.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_SCHEMA)]
    pub async fn download_json_schematized<T>(&self, bucket: &str, name: &str) -> Result<T>
    where
        T: SchemaProvider,
    {
        let want =
            schema::schema_name(T::schema()).ok_or_else(|| Error::unnamed_schema(bucket, name))?;
        let store = self.provider.bucket(bucket)?;

        let info = self.read_info(store.as_ref(), bucket, name).await?;
        let have = info.metadata.get(SCHEMA_REF_KEY).unwrap_or_default();
        if have != want {
            tracing::warn!(
                target: TRACING_TARGET_SCHEMA,
                bucket,
                name,
                have,
                want = %want,
                "Stored schema tag does not match"
            );
            return Err(Error::SchemaMismatch {
                bucket: bucket.to_owned(),
                name: name.to_owned(),
                have: have.to_owned(),
                want,
            });
        }

        let data = self.read_object(store.as_ref(), bucket, name).await?;
        let object: T =
            serde_json::from_slice(&data).map_err(|e| Error::serialization(bucket, name, e))?;
        schema::validate(&object).map_err(|e| Error::schema_validation(bucket, name, e))?;

        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::LazyLock;

    use apache_avro::Schema;
    use serde::{Deserialize, Serialize};

    use super::*;

    const INVOICE_AVSC: &str = r#"{
        "type": "record",
        "name": "Invoice",
        "namespace": "imagination.billing",
        "fields": [
            {"name": "id", "type": "string"},
            {"name": "amount_cents", "type": "long"},
            {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["OPEN", "PAID"]}}
        ]
    }"#;

    static INVOICE_SCHEMA: LazyLock<Schema> =
        LazyLock::new(|| Schema::parse_str(INVOICE_AVSC).unwrap());

    static INVOICE_V2_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
        Schema::parse_str(&INVOICE_AVSC.replace(r#""Invoice""#, r#""InvoiceV2""#)).unwrap()
    });

    static LABELS_SCHEMA: LazyLock<Schema> =
        LazyLock::new(|| Schema::parse_str(r#"{"type": "map", "values": "string"}"#).unwrap());

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Invoice {
        id: String,
        amount_cents: i64,
        status: String,
    }

    impl SchemaProvider for Invoice {
        fn schema() -> &'static Schema {
            &INVOICE_SCHEMA
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct InvoiceV2 {
        id: String,
        amount_cents: i64,
        status: String,
    }

    impl SchemaProvider for InvoiceV2 {
        fn schema() -> &'static Schema {
            &INVOICE_V2_SCHEMA
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(transparent)]
    struct Labels(BTreeMap<String, String>);

    impl SchemaProvider for Labels {
        fn schema() -> &'static Schema {
            &LABELS_SCHEMA
        }
    }

    static MEMO_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
        Schema::parse_str(
            r#"{
                "type": "record",
                "name": "Memo",
                "namespace": "imagination.billing",
                "fields": [
                    {"name": "invoice_id", "type": "string"},
                    {"name": "note", "type": ["string", "null"]}
                ]
            }"#,
        )
        .unwrap()
    });

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Memo {
        invoice_id: String,
        note: Option<String>,
    }

    impl SchemaProvider for Memo {
        fn schema() -> &'static Schema {
            &MEMO_SCHEMA
        }
    }

    fn invoice(status: &str) -> Invoice {
        Invoice {
            id: "inv-42".into(),
            amount_cents: 129_900,
            status: status.into(),
        }
    }

    async fn put_tagged(client: &StorageClient, name: &str, body: &[u8], schema_ref: &str) {
        let metadata = ObjectMetadata::new().with(SCHEMA_REF_KEY, schema_ref);
        client
            .upload("billing", name, &mut &body[..], Some(JSON_CONTENT_TYPE), metadata)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn round_trip() {
        let client = StorageClient::in_memory();
        let original = invoice("OPEN");

        client
            .upload_json_schematized("billing", "invoices/42.json", &original)
            .await
            .unwrap();
        let downloaded: Invoice = client
            .download_json_schematized("billing", "invoices/42.json")
            .await
            .unwrap();

        assert_eq!(downloaded, original);
    }

    #[tokio::test]
    async fn optional_field_with_null_last_round_trips() {
        let client = StorageClient::in_memory();
        let memos = [
            Memo {
                invoice_id: "inv-42".into(),
                note: Some("paid by wire".into()),
            },
            Memo {
                invoice_id: "inv-43".into(),
                note: None,
            },
        ];

        for memo in &memos {
            let name = format!("memos/{}.json", memo.invoice_id);
            client.upload_json_schematized("billing", &name, memo).await.unwrap();
            let stored: Memo = client.download_json_schematized("billing", &name).await.unwrap();
            assert_eq!(&stored, memo);
        }
    }

    #[tokio::test]
    async fn upload_tags_content_type_and_schema() {
        let client = StorageClient::in_memory();
        client
            .upload_json_schematized("billing", "invoices/42.json", &invoice("PAID"))
            .await
            .unwrap();

        let info = client.object_info("billing", "invoices/42.json").await.unwrap();
        assert_eq!(info.content_type.as_deref(), Some("application/json"));
        assert_eq!(
            info.metadata.get(SCHEMA_REF_KEY),
            Some("imagination.billing.Invoice")
        );

        let body = client.download_file("billing", "invoices/42.json").await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "PAID");
    }

    #[tokio::test]
    async fn mismatched_tag_fails() {
        let client = StorageClient::in_memory();
        client
            .upload_json_schematized("billing", "invoices/42.json", &invoice("OPEN"))
            .await
            .unwrap();

        let err = client
            .download_json_schematized::<InvoiceV2>("billing", "invoices/42.json")
            .await
            .unwrap_err();

        match err {
            Error::SchemaMismatch { have, want, .. } => {
                assert_eq!(have, "imagination.billing.Invoice");
                assert_eq!(want, "imagination.billing.InvoiceV2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn mismatched_tag_fails_before_decoding_body() {
        let client = StorageClient::in_memory();
        put_tagged(&client, "garbage.json", b"not json at all", "imagination.billing.Other").await;

        let err = client
            .download_json_schematized::<Invoice>("billing", "garbage.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[tokio::test]
    async fn missing_tag_fails() {
        let client = StorageClient::in_memory();
        let body = serde_json::to_vec(&invoice("OPEN")).unwrap();
        client
            .upload_file("billing", "untagged.json", body.as_slice())
            .await
            .unwrap();

        let err = client
            .download_json_schematized::<Invoice>("billing", "untagged.json")
            .await
            .unwrap_err();

        match err {
            Error::SchemaMismatch { have, .. } => assert!(have.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_value_is_never_written() {
        let client = StorageClient::in_memory();

        let err = client
            .upload_json_schematized("billing", "invoices/42.json", &invoice("VOID"))
            .await
            .unwrap_err();
        match err {
            Error::SchemaValidation { bucket, name, source } => {
                assert_eq!(bucket, "billing");
                assert_eq!(name, "invoices/42.json");
                assert_eq!(source.schema, "imagination.billing.Invoice");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = client.download_file("billing", "invoices/42.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn invalid_value_does_not_overwrite() {
        let client = StorageClient::in_memory();
        let original = invoice("OPEN");
        client
            .upload_json_schematized("billing", "invoices/42.json", &original)
            .await
            .unwrap();

        client
            .upload_json_schematized("billing", "invoices/42.json", &invoice("VOID"))
            .await
            .unwrap_err();

        let stored: Invoice = client
            .download_json_schematized("billing", "invoices/42.json")
            .await
            .unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn stored_value_violating_schema_fails() {
        let client = StorageClient::in_memory();
        put_tagged(
            &client,
            "invoices/void.json",
            br#"{"id":"inv-9","amount_cents":5,"status":"VOID"}"#,
            "imagination.billing.Invoice",
        )
        .await;

        let err = client
            .download_json_schematized::<Invoice>("billing", "invoices/void.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn undecodable_body_is_serialization_error() {
        let client = StorageClient::in_memory();
        put_tagged(
            &client,
            "invoices/short.json",
            br#"{"id":"inv-9"}"#,
            "imagination.billing.Invoice",
        )
        .await;

        let err = client
            .download_json_schematized::<Invoice>("billing", "invoices/short.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }

    #[tokio::test]
    async fn download_missing_object() {
        let client = StorageClient::in_memory();
        let err = client
            .download_json_schematized::<Invoice>("billing", "nope.json")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unnamed_schema_is_rejected() {
        let client = StorageClient::in_memory();
        let labels = Labels(BTreeMap::from([("team".to_owned(), "core".to_owned())]));

        let err = client
            .upload_json_schematized("billing", "labels.json", &labels)
            .await
            .unwrap_err();
        match err {
            Error::UnnamedSchema { bucket, name } => {
                assert_eq!(bucket, "billing");
                assert_eq!(name, "labels.json");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = client
            .download_json_schematized::<Labels>("billing", "labels.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnnamedSchema { .. }));
    }
}
