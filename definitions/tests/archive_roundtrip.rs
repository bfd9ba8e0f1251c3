//! Definitions stored into an archive, encoded, decoded and loaded back.

use archive::{decode_archive, encode_archive, Archive, ArchiveError, CompressionMode, DecodeOptions};
use definitions::domain::{flo, idk, loc, npc, obj, seq, spotanim, varbit, varp};
use definitions::{
    load_definitions, store_definitions, CodecError, ConfigDefinition, DefinitionSupplier, Domain,
    RecordLayout,
};
use schema::{Morphisms, PropertyValue};

fn through_container(archive: &Archive, mode: CompressionMode) -> Archive {
    let bytes = encode_archive(archive, mode).unwrap();
    decode_archive(&bytes, &DecodeOptions::size_aware()).unwrap()
}

fn round_trip<T>(supplier: &DefinitionSupplier<T>, definitions: &[T]) -> Vec<T>
where
    T: ConfigDefinition,
{
    let archive = store_definitions(&Archive::empty(), supplier, definitions).unwrap();
    let archive = through_container(&archive, CompressionMode::PerEntry);
    load_definitions(&archive, supplier).unwrap()
}

#[test]
fn objects_round_trip() {
    let mut sword = obj::SUPPLIER.create_default(0);
    sword.set(obj::DISPLAY_NAME, "Bronze sword").unwrap();
    sword.set(obj::VALUE, 26).unwrap();
    sword.set(obj::inventory_action(1), "Wield").unwrap();
    sword
        .set(
            obj::COLOURS,
            PropertyValue::List(vec![PropertyValue::int_tuple([61, 5652])]),
        )
        .unwrap();
    let mut coins = obj::SUPPLIER.create_default(1);
    coins.set(obj::STACKABLE, true).unwrap();

    let loaded = round_trip(&obj::SUPPLIER, &[sword.clone(), coins.clone()]);
    assert_eq!(loaded, vec![sword, coins]);
    assert_eq!(loaded[0].name(), Some("Bronze sword"));
    assert_eq!(loaded[0].value(), 26);
    assert_eq!(loaded[0].inventory_action(1), Some("Wield"));
    assert_eq!(loaded[0].colours(), vec![(61, 5652)]);
    assert!(loaded[1].is_stackable());
}

#[test]
fn npcs_round_trip() {
    let mut guard = npc::SUPPLIER.create_default(0);
    guard.set(npc::DISPLAY_NAME, "Guard").unwrap();
    guard.set(npc::COMBAT_LEVEL, 21).unwrap();
    guard.set(npc::action(1), "Attack").unwrap();
    guard
        .set(npc::MORPHISMS, Morphisms::new(-1, 310, vec![3, 4, -1]))
        .unwrap();

    let loaded = round_trip(&npc::SUPPLIER, &[guard.clone()]);
    assert_eq!(loaded, vec![guard]);
    assert_eq!(loaded[0].combat_level(), 21);
    assert_eq!(loaded[0].action(1), Some("Attack"));
    assert_eq!(loaded[0].morphisms().map(|m| m.children.len()), Some(3));
}

#[test]
fn locations_round_trip() {
    let mut door = loc::SUPPLIER.create_default(0);
    door.set(loc::DISPLAY_NAME, "Door").unwrap();
    door.set(loc::action(0), "Open").unwrap();
    let mut tree = loc::SUPPLIER.create_default(2);
    tree.set(loc::DISPLAY_NAME, "Tree").unwrap();
    tree.set(loc::WIDTH, 2).unwrap();

    let loaded = round_trip(&loc::SUPPLIER, &[tree.clone(), door.clone()]);
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0], door);
    assert_eq!(loaded[1].properties().custom().count(), 0);
    assert_eq!(loaded[2], tree);
    assert!(loaded[0].is_solid());
    assert!(loaded[0].is_impenetrable());
}

#[test]
fn counted_domains_round_trip() {
    let mut grass = flo::SUPPLIER.create_default(0);
    grass.set(flo::COLOUR, 0x00_35_72_0F).unwrap();
    grass.set(flo::DISPLAY_NAME, "grass").unwrap();
    assert_eq!(round_trip(&flo::SUPPLIER, &[grass.clone()]), vec![grass]);

    let mut hair = idk::SUPPLIER.create_default(0);
    hair.set(idk::BODY_PART, 0).unwrap();
    hair.set(idk::head_model(0), 240).unwrap();
    let loaded = round_trip(&idk::SUPPLIER, &[hair.clone()]);
    assert_eq!(loaded, vec![hair]);
    assert_eq!(loaded[0].body_part(), Some(0));

    let mut bits = varbit::SUPPLIER.create_default(0);
    bits.set(varbit::BITS, PropertyValue::int_tuple([300, 0, 3])).unwrap();
    let loaded = round_trip(&varbit::SUPPLIER, &[bits.clone()]);
    assert_eq!(loaded[0].varp(), 300);
    assert_eq!(loaded[0].high_bit(), 3);

    let mut quest = varp::SUPPLIER.create_default(1);
    quest.set(varp::CLIENT_CODE, 4).unwrap();
    let loaded = round_trip(&varp::SUPPLIER, &[quest.clone()]);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1], quest);

    let mut wave = seq::SUPPLIER.create_default(0);
    wave.set(
        seq::FRAMES,
        PropertyValue::List(vec![PropertyValue::int_tuple([12, -1, 3])]),
    )
    .unwrap();
    wave.set(seq::PRIORITY, 8).unwrap();
    let loaded = round_trip(&seq::SUPPLIER, &[wave.clone()]);
    assert_eq!(loaded, vec![wave]);
    assert_eq!(loaded[0].frames()[0].secondary, -1);

    let mut splash = spotanim::SUPPLIER.create_default(0);
    splash.set(spotanim::MODEL, 2000).unwrap();
    splash.set(spotanim::ANIMATION, 180).unwrap();
    assert_eq!(round_trip(&spotanim::SUPPLIER, &[splash.clone()]), vec![splash]);
}

#[test]
fn every_domain_survives_every_compression_mode() {
    let mut archive = Archive::empty();
    archive = store_definitions(&archive, &obj::SUPPLIER, &[obj::SUPPLIER.create_default(0)]).unwrap();
    archive = store_definitions(&archive, &npc::SUPPLIER, &[npc::SUPPLIER.create_default(0)]).unwrap();
    archive = store_definitions(&archive, &loc::SUPPLIER, &[loc::SUPPLIER.create_default(0)]).unwrap();
    archive = store_definitions(&archive, &flo::SUPPLIER, &[flo::SUPPLIER.create_default(0)]).unwrap();
    archive = store_definitions(&archive, &idk::SUPPLIER, &[idk::SUPPLIER.create_default(0)]).unwrap();
    archive =
        store_definitions(&archive, &varbit::SUPPLIER, &[varbit::SUPPLIER.create_default(0)]).unwrap();
    archive = store_definitions(&archive, &varp::SUPPLIER, &[varp::SUPPLIER.create_default(0)]).unwrap();
    archive = store_definitions(&archive, &seq::SUPPLIER, &[seq::SUPPLIER.create_default(0)]).unwrap();
    archive =
        store_definitions(&archive, &spotanim::SUPPLIER, &[spotanim::SUPPLIER.create_default(0)])
            .unwrap();

    for mode in [CompressionMode::None, CompressionMode::PerEntry, CompressionMode::Whole] {
        let decoded = through_container(&archive, mode);
        assert_eq!(decoded, archive, "{mode:?}");
        for domain in Domain::ALL {
            let records = domain.read(&decoded).unwrap();
            assert_eq!(records.len(), 1, "{domain}");
            assert_eq!(records[0].custom().count(), 0, "{domain}");
        }
    }
}

#[test]
fn storing_replaces_only_the_domain_entries() {
    let mut first = varp::SUPPLIER.create_default(0);
    first.set(varp::CLIENT_CODE, 1).unwrap();
    let archive = store_definitions(&Archive::empty(), &varp::SUPPLIER, &[first]).unwrap();
    let archive = store_definitions(&archive, &flo::SUPPLIER, &[flo::SUPPLIER.create_default(0)]).unwrap();

    let mut second = varp::SUPPLIER.create_default(0);
    second.set(varp::CLIENT_CODE, 2).unwrap();
    let replaced = store_definitions(&archive, &varp::SUPPLIER, &[second]).unwrap();

    assert_eq!(replaced.len(), archive.len());
    assert_eq!(load_definitions(&replaced, &varp::SUPPLIER).unwrap()[0].client_code(), 2);
    assert_eq!(load_definitions(&archive, &varp::SUPPLIER).unwrap()[0].client_code(), 1);
    assert_eq!(load_definitions(&replaced, &flo::SUPPLIER).unwrap().len(), 1);
}

#[test]
fn missing_domain_entries_fail_the_load() {
    let err = load_definitions(&Archive::empty(), &obj::SUPPLIER).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Archive(ArchiveError::EntryNotFound { .. })
    ));
}

#[test]
fn layout_override_is_honoured() {
    let supplier = varp::SUPPLIER.with_layout(RecordLayout::Indexed);
    let mut definition = supplier.create_default(0);
    definition.set(varp::PERSIST, false).unwrap();

    let archive = store_definitions(&Archive::empty(), &supplier, &[definition.clone()]).unwrap();
    assert!(archive.get_named("varp.idx").is_some());
    assert_eq!(load_definitions(&archive, &supplier).unwrap(), vec![definition]);
    assert!(load_definitions(&archive, &varp::SUPPLIER).is_err());
}

#[test]
fn bad_record_fails_the_whole_batch() {
    let archive = store_definitions(
        &Archive::empty(),
        &obj::SUPPLIER,
        &[obj::SUPPLIER.create_default(0)],
    )
    .unwrap();
    let archive = archive.with_entry(archive::ArchiveEntry::named("obj.dat", vec![0, 99, 0]));
    let archive = archive.with_entry(archive::ArchiveEntry::named("obj.idx", vec![0, 2, 0, 1, 0, 2]));

    let err = load_definitions(&archive, &obj::SUPPLIER).unwrap_err();
    assert_eq!(
        err,
        CodecError::UnknownOpcode {
            domain: "obj",
            id: 1,
            opcode: 99
        }
    );
}
