use proptest::prelude::*;

use teamroster::{
    contact::{Contact, ContactDraft},
    core::store::ContactStore,
    country::table,
    persist::{ContactRepository, memory::MemoryStorage},
};

fn draft_strategy() -> impl Strategy<Value = ContactDraft> {
    let codes: Vec<&'static str> = table::countries().iter().map(|c| c.code).collect();
    (prop::sample::select(codes), "[A-Za-z][A-Za-z ]{0,20}", any::<u64>()).prop_map(
        |(code, name, seed)| {
            let len = table::find(code).map(|c| c.phone_length).unwrap_or(10);
            let digits: String = seed.to_string().chars().cycle().take(len).collect();
            ContactDraft {
                name,
                country_code: code.to_string(),
                number: digits,
            }
        },
    )
}

fn collection(drafts: Vec<ContactDraft>) -> Vec<Contact> {
    let mut store = ContactStore::new();
    for (i, draft) in drafts.into_iter().enumerate() {
        store.insert(draft, 1_700_000_000_000 + i as u64);
    }
    store.to_vec()
}

proptest! {
    #[test]
    fn save_then_load_round_trips(drafts in prop::collection::vec(draft_strategy(), 0..40)) {
        let contacts = collection(drafts);
        for c in &contacts {
            let draft = ContactDraft {
                name: c.name.clone(),
                country_code: c.country_code.clone(),
                number: c.number.clone(),
            };
            prop_assert!(draft.validate().is_ok());
        }

        let mut repo = ContactRepository::new(Box::new(MemoryStorage::new()));
        repo.save_all(&contacts).expect("save");
        prop_assert_eq!(repo.load(true).expect("load"), contacts);
    }

    #[test]
    fn added_contact_is_present_exactly_once(
        drafts in prop::collection::vec(draft_strategy(), 0..20),
        extra in draft_strategy(),
    ) {
        let mut store = ContactStore::from_contacts(collection(drafts));
        let added = store.insert(extra, 1);

        let mut repo = ContactRepository::new(Box::new(MemoryStorage::new()));
        repo.save_all(&store.to_vec()).expect("save");
        let reloaded = repo.load(false).expect("load");
        prop_assert_eq!(reloaded.iter().filter(|c| c.id == added.id).count(), 1);
        prop_assert_eq!(reloaded.last(), Some(&added));
    }

    #[test]
    fn delete_removes_exactly_one_or_nothing(
        drafts in prop::collection::vec(draft_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let contacts = collection(drafts);
        let mut repo = ContactRepository::new(Box::new(MemoryStorage::new()));

        let unchanged = repo.delete_by_id(&contacts, "not-an-id").expect("delete");
        prop_assert_eq!(&unchanged, &contacts);

        let target = contacts[pick.index(contacts.len())].id.clone();
        let after = repo.delete_by_id(&contacts, &target).expect("delete");
        prop_assert_eq!(after.len(), contacts.len() - 1);
        prop_assert!(after.iter().all(|c| c.id != target));
        prop_assert_eq!(repo.load(false).expect("load"), after);
    }

    #[test]
    fn window_never_exceeds_collection(n in 0usize..40, steps in 0usize..10) {
        let contacts: Vec<Contact> = (0..n)
            .map(|i| Contact {
                id: i.to_string(),
                name: format!("M{i}"),
                country_code: "+1".to_string(),
                number: "5551234567".to_string(),
            })
            .collect();
        let store = ContactStore::from_contacts(contacts.clone());
        let window = 5 + 5 * steps;
        let visible = store.window_cloned(window);
        prop_assert_eq!(visible.len(), window.min(n));
        prop_assert_eq!(&visible[..], &contacts[..visible.len()]);
    }
}
