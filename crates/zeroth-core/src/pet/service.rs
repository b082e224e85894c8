//! Pet operations for the signed-in user.

use super::model::{Disease, NewPet, Pet, PetId, PetImage};
use crate::api::PetApi;
use crate::error::{Result, ZerothError};
use crate::session::SessionManager;
use std::sync::Arc;

/// Authenticated pet CRUD plus the public disease catalog.
///
/// Every call goes through [`SessionManager::authorized`], so a 401 from any
/// of them ends the session.
#[derive(Clone)]
pub struct PetService {
    api: Arc<dyn PetApi>,
    session: Arc<SessionManager>,
}

impl PetService {
    pub fn new(api: Arc<dyn PetApi>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    pub async fn list(&self) -> Result<Vec<Pet>> {
        let api = &self.api;
        self.session
            .authorized(|token| async move { api.list_pets(&token).await })
            .await
    }

    /// Finds one pet of the signed-in user by id.
    pub async fn find(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.list().await?.into_iter().find(|pet| pet.id == id))
    }

    /// Registers a pet. The image, when given, is sent in the same request.
    pub async fn create(&self, pet: &NewPet, image: Option<&PetImage>) -> Result<()> {
        if pet.name.trim().is_empty() {
            return Err(ZerothError::validation("pet name is required"));
        }
        let api = &self.api;
        self.session
            .authorized(|token| async move { api.create_pet(&token, pet, image).await })
            .await?;
        tracing::info!("[Pet] Registered pet '{}'", pet.name);
        Ok(())
    }

    pub async fn delete(&self, id: PetId) -> Result<()> {
        let api = &self.api;
        self.session
            .authorized(|token| async move { api.delete_pet(&token, id).await })
            .await?;
        tracing::info!("[Pet] Deleted pet {}", id);
        Ok(())
    }

    pub async fn upload_image(&self, id: PetId, image: &PetImage) -> Result<()> {
        if image.bytes.is_empty() {
            return Err(ZerothError::validation("image file is empty"));
        }
        let api = &self.api;
        self.session
            .authorized(|token| async move { api.upload_pet_image(&token, id, image).await })
            .await?;
        tracing::info!("[Pet] Uploaded image for pet {}", id);
        Ok(())
    }

    /// Chronic-condition catalog. Works without a session.
    pub async fn diseases(&self) -> Result<Vec<Disease>> {
        Ok(self.api.list_diseases().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Registration;
    use crate::api::{AccountApi, ApiError, ApiResult, BearerToken};
    use crate::pet::PetSex;
    use crate::session::{LoginGrant, MemoryTokenStore, UserIdentity};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct AcceptingAccountApi;

    #[async_trait::async_trait]
    impl AccountApi for AcceptingAccountApi {
        async fn register(&self, _registration: &Registration) -> ApiResult<()> {
            Ok(())
        }

        async fn login(&self, _email: &str, _password: &str) -> ApiResult<LoginGrant> {
            Ok(LoginGrant {
                token: BearerToken::new("tok"),
                screen_name: "owner".into(),
            })
        }

        async fn me(&self, _token: &BearerToken) -> ApiResult<UserIdentity> {
            Ok(UserIdentity {
                email: "owner@example.com".into(),
                screen_name: "owner".into(),
            })
        }
    }

    // In-memory pet API keyed by id
    #[derive(Default)]
    struct MockPetApi {
        pets: Mutex<Vec<Pet>>,
        uploads: Mutex<Vec<(PetId, String)>>,
        reject_token: bool,
    }

    impl MockPetApi {
        fn check(&self, token: &BearerToken) -> ApiResult<()> {
            if self.reject_token || token != &BearerToken::new("tok") {
                return Err(ApiError::unauthorized(Some("token expired".into())));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl PetApi for MockPetApi {
        async fn list_pets(&self, token: &BearerToken) -> ApiResult<Vec<Pet>> {
            self.check(token)?;
            Ok(self.pets.lock().unwrap().clone())
        }

        async fn create_pet(
            &self,
            token: &BearerToken,
            pet: &NewPet,
            image: Option<&PetImage>,
        ) -> ApiResult<()> {
            self.check(token)?;
            let mut pets = self.pets.lock().unwrap();
            let id = pets.len() as PetId + 1;
            pets.push(Pet {
                id,
                name: pet.name.clone(),
                sex: pet.sex,
                birth_date: pet.birth_date,
                neutered: pet.neutered,
                disease_id: pet.disease_id,
                image: image.map(|i| i.bytes.clone()),
            });
            Ok(())
        }

        async fn delete_pet(&self, token: &BearerToken, id: PetId) -> ApiResult<()> {
            self.check(token)?;
            let mut pets = self.pets.lock().unwrap();
            let before = pets.len();
            pets.retain(|pet| pet.id != id);
            if pets.len() == before {
                return Err(ApiError::validation(404, "Pet not found"));
            }
            Ok(())
        }

        async fn upload_pet_image(
            &self,
            token: &BearerToken,
            id: PetId,
            image: &PetImage,
        ) -> ApiResult<()> {
            self.check(token)?;
            self.uploads
                .lock()
                .unwrap()
                .push((id, image.file_name.clone()));
            Ok(())
        }

        async fn list_diseases(&self) -> ApiResult<Vec<Disease>> {
            Ok(vec![Disease {
                id: 1,
                name: "Chronic kidney disease".into(),
            }])
        }
    }

    async fn service_with(api: MockPetApi) -> (PetService, Arc<SessionManager>) {
        let session = Arc::new(SessionManager::new(
            Arc::new(AcceptingAccountApi),
            Arc::new(MemoryTokenStore::new()),
        ));
        session.sign_in("owner@example.com", "pw").await.unwrap();
        (PetService::new(Arc::new(api), session.clone()), session)
    }

    fn coco() -> NewPet {
        NewPet {
            name: "Coco".into(),
            sex: PetSex::Female,
            birth_date: NaiveDate::from_ymd_opt(2020, 5, 17).unwrap(),
            neutered: true,
            disease_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (service, _session) = service_with(MockPetApi::default()).await;

        let image = PetImage::new("coco.png", vec![1, 2, 3]);
        service.create(&coco(), Some(&image)).await.unwrap();
        let pets = service.list().await.unwrap();

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Coco");
        assert_eq!(pets[0].disease_id, None);
        assert_eq!(pets[0].image.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(pets[0].label(), "Coco (female)");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (service, _session) = service_with(MockPetApi::default()).await;
        let mut pet = coco();
        pet.name = " ".into();

        assert_eq!(
            service.create(&pet, None).await,
            Err(ZerothError::validation("pet name is required"))
        );
    }

    #[tokio::test]
    async fn test_delete_and_find() {
        let (service, _session) = service_with(MockPetApi::default()).await;
        service.create(&coco(), None).await.unwrap();

        assert!(service.find(1).await.unwrap().is_some());
        service.delete(1).await.unwrap();
        assert!(service.find(1).await.unwrap().is_none());

        let err = service.delete(1).await.unwrap_err();
        assert_eq!(err.user_message("Delete"), "Delete failed: Pet not found");
    }

    #[tokio::test]
    async fn test_upload_image() {
        let (service, _session) = service_with(MockPetApi::default()).await;

        assert!(
            service
                .upload_image(3, &PetImage::new("empty.jpg", Vec::new()))
                .await
                .is_err()
        );
        service
            .upload_image(3, &PetImage::new("coco.jpg", vec![0xff, 0xd8]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejected_token_ends_session() {
        let (service, session) = service_with(MockPetApi {
            reject_token: true,
            ..Default::default()
        })
        .await;

        let err = service.list().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(session.current().is_none());
        assert_eq!(service.list().await, Err(ZerothError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_diseases_work_without_session() {
        let session = Arc::new(SessionManager::new(
            Arc::new(AcceptingAccountApi),
            Arc::new(MemoryTokenStore::new()),
        ));
        let service = PetService::new(Arc::new(MockPetApi::default()), session);

        let diseases = service.diseases().await.unwrap();
        assert_eq!(diseases[0].name, "Chronic kidney disease");
    }
}
