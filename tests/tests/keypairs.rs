#[allow(unused)]
use utils::*;

#[cfg(feature = "integration")]
mod tests {
    use super::*;

    use stratus::prelude::*;
    use stratus::scenarios::keypairs;
    use url::Url;

    // The mock service state is process-global; serialize tests around it.
    static LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    fn client() -> HttpComputeClient {
        HttpComputeClient::new(Url::parse(&format!("http://{MOCK_ADDR}")).unwrap())
    }

    #[tokio::test]
    async fn create_and_list_leaves_one_keypair() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        keypairs::create_and_list_keypairs(&compute, &KeypairParams::default())
            .await
            .unwrap();

        let listed = compute.list_keypairs().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].name.starts_with("stratus-"));
        assert!(!listed[0].public_key.is_empty());
    }

    #[tokio::test]
    async fn create_and_delete_leaves_nothing() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        keypairs::create_and_delete_keypair(&compute, &KeypairParams::default())
            .await
            .unwrap();

        assert!(compute.list_keypairs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn boot_and_delete_tears_everything_down() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        keypairs::boot_and_delete_server_with_keypair(
            &compute,
            &ImageRef("img-cirros".to_string()),
            &FlavorRef("m1.tiny".to_string()),
            &BootArgs::default(),
            &KeypairParams::default(),
        )
        .await
        .unwrap();

        assert!(compute.list_keypairs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_and_get_round_trips_the_name() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        keypairs::create_and_get_keypair(&compute, &KeypairParams::default())
            .await
            .unwrap();

        let listed = compute.list_keypairs().await.unwrap();
        assert_eq!(listed.len(), 1);
        let fetched = compute.get_keypair(&listed[0].name).await.unwrap();
        assert_eq!(fetched.name, listed[0].name);
    }

    #[tokio::test]
    async fn keypair_in_use_cannot_be_deleted() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        let keypair = compute
            .create_keypair("kp-pinned", &KeypairParams::default())
            .await
            .unwrap();
        let server = compute
            .boot_server(
                "srv-pinned",
                &ImageRef("img-cirros".to_string()),
                &FlavorRef("m1.tiny".to_string()),
                &keypair.name,
                &BootParams::default(),
            )
            .await
            .unwrap();

        let err = compute.delete_keypair(&keypair.name).await.unwrap_err();
        assert!(matches!(err, ApiError::Service { status: 409, .. }));

        // Server first, then the keypair goes through.
        compute.delete_server(&server.id).await.unwrap();
        compute.delete_keypair(&keypair.name).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_keypair_is_a_404() {
        init().await;
        let _guard = LOCK.lock().await;
        let compute = client();

        let err = compute.get_keypair("kp-does-not-exist").await.unwrap_err();
        assert!(matches!(err, ApiError::Service { status: 404, .. }));
    }

    #[tokio::test]
    async fn imported_public_key_is_preserved() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        let params = KeypairParams {
            public_key: Some("ssh-rsa AAAA test@host".to_string()),
            key_type: Some(KeyType::Ssh),
        };
        let keypair = compute.create_keypair("kp-import", &params).await.unwrap();
        assert_eq!(keypair.public_key, "ssh-rsa AAAA test@host");
    }

    #[tokio::test]
    async fn registry_entries_all_pass_against_the_mock() {
        init().await;
        let _guard = LOCK.lock().await;
        mock_compute::reset();
        let compute = client();

        let args = ScenarioArgs {
            image: Some(ImageRef("img-cirros".to_string())),
            flavor: Some(FlavorRef("m1.tiny".to_string())),
            ..ScenarioArgs::default()
        };

        for entry in stratus::builtin_scenarios() {
            (entry.run)(&compute, &args).await.unwrap();
        }
    }
}
