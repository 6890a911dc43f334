use std::sync::Arc;

use models::input::{MedicineForm, NameForm};
use models::views::{AveragePrice, MedicineList, MedicineView, Message};
use models::Medicine;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::medicine::repository::MedicineRepository;

const ENTITY: &str = "Medicine";

/// Application service for the medicine collection: validation, lookup
/// rules and rendering of prices for clients.
#[derive(Clone)]
pub struct MedicineService {
    repo: Arc<dyn MedicineRepository>,
}

impl MedicineService {
    pub fn new(repo: Arc<dyn MedicineRepository>) -> Self { Self { repo } }

    /// Every named record, in stored order.
    pub async fn list(&self) -> Result<MedicineList, ServiceError> {
        let doc = self.repo.load().await?;
        let medicines = doc.medicines.iter().filter_map(MedicineView::from_record).collect();
        Ok(MedicineList { medicines })
    }

    pub async fn get(&self, name: &str) -> Result<MedicineView, ServiceError> {
        let doc = self.repo.load().await?;
        doc.find(name)
            .and_then(MedicineView::from_record)
            .ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    #[instrument(skip_all)]
    pub async fn create(&self, form: MedicineForm) -> Result<Message, ServiceError> {
        let input = form.validate()?;
        self.repo.append(Medicine::new(input.name.clone(), Some(input.price))).await?;
        info!(name = %input.name, price = input.price, "medicine created");
        Ok(Message::new(format!("Medicine created successfully with name: {}", input.name)))
    }

    #[instrument(skip_all)]
    pub async fn update(&self, form: MedicineForm) -> Result<Message, ServiceError> {
        let input = form.validate()?;
        if !self.repo.set_price(&input.name, input.price).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(name = %input.name, price = input.price, "medicine updated");
        Ok(Message::new(format!("Medicine updated successfully with name: {}", input.name)))
    }

    #[instrument(skip_all)]
    pub async fn delete(&self, form: NameForm) -> Result<Message, ServiceError> {
        let name = form.validate()?;
        if !self.repo.remove_first(&name).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(%name, "medicine deleted");
        Ok(Message::new(format!("Medicine deleted successfully with name: {}", name)))
    }

    pub async fn average_price(&self) -> Result<AveragePrice, ServiceError> {
        let doc = self.repo.load().await?;
        Ok(AveragePrice::from_mean(doc.average_price()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::medicine_store::MedicineFileStore;
    use std::path::PathBuf;

    struct Fixture {
        path: PathBuf,
        service: MedicineService,
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    async fn fixture(initial: &str) -> Fixture {
        let path = std::env::temp_dir().join(format!("medicine_service_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, initial).await.expect("write fixture");
        let service = MedicineService::new(MedicineFileStore::new(&path));
        Fixture { path, service }
    }

    fn names(list: &MedicineList) -> Vec<&str> {
        list.medicines.iter().map(|m| m.name.as_str()).collect()
    }

    #[tokio::test]
    async fn crud_scenario_end_to_end() -> Result<(), anyhow::Error> {
        let fx = fixture(r#"{"medicines":[{"name":"Paracetamol","price":2.5}]}"#).await;
        let svc = &fx.service;

        let msg = svc.create(MedicineForm::new("Ibuprofen", "3")).await?;
        assert_eq!(msg.message, "Medicine created successfully with name: Ibuprofen");
        assert_eq!(names(&svc.list().await?), vec!["Paracetamol", "Ibuprofen"]);

        svc.update(MedicineForm::new("Ibuprofen", "4.25")).await?;
        assert_eq!(svc.get("Ibuprofen").await?.price, "£4.25");

        svc.delete(NameForm { name: Some("Paracetamol".into()) }).await?;
        let list = svc.list().await?;
        assert_eq!(names(&list), vec!["Ibuprofen"]);
        assert_eq!(list.medicines[0].price, "£4.25");
        Ok(())
    }

    #[tokio::test]
    async fn list_skips_unnamed_and_formats_prices() -> Result<(), anyhow::Error> {
        let fx = fixture(
            r#"{"medicines":[
                {"name":"A","price":5},
                {"name":"","price":1},
                {"price":2},
                {"name":"B","price":""},
                {"name":"C"}
            ]}"#,
        )
        .await;
        let list = fx.service.list().await?;
        let rendered: Vec<(&str, &str)> =
            list.medicines.iter().map(|m| (m.name.as_str(), m.price.as_str())).collect();
        assert_eq!(
            rendered,
            vec![("A", "£5.00"), ("B", "Price Not Available"), ("C", "Price Not Available")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_uses_first_match_and_reports_missing() -> Result<(), anyhow::Error> {
        let fx = fixture(r#"{"medicines":[{"name":"X"},{"name":"X","price":7}]}"#).await;
        assert_eq!(fx.service.get("X").await?.price, "Price Not Available");
        assert!(matches!(fx.service.get("x").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicates_are_appended_and_only_first_is_touched() -> Result<(), anyhow::Error> {
        let fx = fixture(r#"{"medicines":[]}"#).await;
        let svc = &fx.service;
        for _ in 0..3 {
            svc.create(MedicineForm::new("Dup", "1")).await?;
        }
        assert_eq!(svc.list().await?.medicines.len(), 3);

        svc.update(MedicineForm::new("Dup", "2")).await?;
        let prices: Vec<String> = svc.list().await?.medicines.into_iter().map(|m| m.price).collect();
        assert_eq!(prices, vec!["£2.00", "£1.00", "£1.00"]);

        svc.delete(NameForm { name: Some("Dup".into()) }).await?;
        let prices: Vec<String> = svc.list().await?.medicines.into_iter().map(|m| m.price).collect();
        assert_eq!(prices, vec!["£1.00", "£1.00"]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_names_leave_collection_unchanged() -> Result<(), anyhow::Error> {
        let fx = fixture(r#"{"medicines":[{"name":"A","price":1}]}"#).await;
        let before = fx.service.list().await?;
        assert!(matches!(
            fx.service.update(MedicineForm::new("B", "2")).await,
            Err(ServiceError::NotFound(msg)) if msg == "Medicine not found"
        ));
        assert!(matches!(
            fx.service.delete(NameForm { name: Some("B".into()) }).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(fx.service.list().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_storage() -> Result<(), anyhow::Error> {
        let fx = fixture(r#"{"medicines":[]}"#).await;
        assert!(matches!(
            fx.service.create(MedicineForm::new("A", "")).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            fx.service.update(MedicineForm { name: None, price: Some("1".into()) }).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(fx.service.delete(NameForm::default()).await, Err(ServiceError::Validation(_))));
        assert!(fx.service.list().await?.medicines.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn average_price_cases() -> Result<(), anyhow::Error> {
        let empty = fixture(r#"{"medicines":[]}"#).await;
        assert_eq!(empty.service.average_price().await?.average_price, "No valid prices available");

        let unpriced = fixture(r#"{"medicines":[{"name":"A"},{"name":"B","price":null}]}"#).await;
        assert_eq!(unpriced.service.average_price().await?.average_price, "No valid prices available");

        let priced = fixture(r#"{"medicines":[{"name":"A","price":10},{"name":"B","price":20},{"name":"C"}]}"#).await;
        assert_eq!(priced.service.average_price().await?.average_price, "£15.00");
        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_surface_as_unavailable() {
        let fx = fixture("not json").await;
        assert!(matches!(fx.service.list().await, Err(ServiceError::StorageUnavailable(_))));
        assert!(matches!(
            fx.service.create(MedicineForm::new("A", "1")).await,
            Err(ServiceError::StorageUnavailable(_))
        ));
        assert!(matches!(fx.service.average_price().await, Err(ServiceError::StorageUnavailable(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_lose_nothing() -> Result<(), anyhow::Error> {
        let fx = fixture(r#"{"medicines":[]}"#).await;
        let mut tasks = Vec::new();
        for i in 0..32 {
            let svc = fx.service.clone();
            tasks.push(tokio::spawn(async move {
                svc.create(MedicineForm::new(format!("med-{i}"), format!("{i}"))).await
            }));
        }
        for t in tasks {
            t.await??;
        }
        assert_eq!(fx.service.list().await?.medicines.len(), 32);
        Ok(())
    }
}
