//! Property tests: for every representation a type supports, reading back
//! what the serializer wrote recovers the original value.

use bindoc_odm::{BitSeq, Representation, SerializerRegistry, TimeSpan};
use proptest::prelude::*;

proptest! {
    #[test]
    fn u32_roundtrips_through_every_representation(v in any::<u32>()) {
        let serializer = SerializerRegistry::global().lookup::<u32>().unwrap();
        for rep in serializer.supported() {
            let wire = serializer.write(&v, *rep);
            let back = serializer.read(&wire, *rep).unwrap();
            prop_assert_eq!(back, v, "rep {}", rep);
        }
    }

    #[test]
    fn i16_roundtrips_through_every_representation(v in any::<i16>()) {
        let serializer = SerializerRegistry::global().lookup::<i16>().unwrap();
        for rep in serializer.supported() {
            let wire = serializer.write(&v, *rep);
            prop_assert_eq!(serializer.read(&wire, *rep).unwrap(), v, "rep {}", rep);
        }
    }

    #[test]
    fn u64_roundtrips_through_full_width_representations(v in any::<u64>()) {
        let serializer = SerializerRegistry::global().lookup::<u64>().unwrap();
        for rep in [Representation::Int64, Representation::String] {
            let wire = serializer.write(&v, rep);
            prop_assert_eq!(serializer.read(&wire, rep).unwrap(), v, "rep {}", rep);
        }
    }

    #[test]
    fn i8_roundtrips_through_every_representation(v in any::<i8>()) {
        let serializer = SerializerRegistry::global().lookup::<i8>().unwrap();
        for rep in serializer.supported() {
            let wire = serializer.write(&v, *rep);
            prop_assert_eq!(serializer.read(&wire, *rep).unwrap(), v, "rep {}", rep);
        }
    }

    #[test]
    fn finite_doubles_roundtrip_through_double_and_string(v in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let serializer = SerializerRegistry::global().lookup::<f64>().unwrap();
        for rep in [Representation::Double, Representation::String] {
            let wire = serializer.write(&v, rep);
            prop_assert_eq!(serializer.read(&wire, rep).unwrap(), v, "rep {}", rep);
        }
    }

    #[test]
    fn bit_sequences_keep_their_exact_length(bits in proptest::collection::vec(any::<bool>(), 0..64)) {
        let seq = BitSeq::from_bools(&bits);
        let serializer = SerializerRegistry::global().lookup::<BitSeq>().unwrap();
        for rep in serializer.supported() {
            let wire = serializer.write(&seq, *rep);
            let back = serializer.read(&wire, *rep).unwrap();
            prop_assert_eq!(&back, &seq, "rep {}", rep);
            prop_assert_eq!(back.len(), bits.len());
        }
    }

    #[test]
    fn timespans_roundtrip_through_text(ticks in any::<i64>()) {
        let span = TimeSpan::from_ticks(ticks);
        let serializer = SerializerRegistry::global().lookup::<TimeSpan>().unwrap();
        let wire = serializer.write(&span, Representation::String);
        prop_assert_eq!(serializer.read(&wire, Representation::String).unwrap(), span);
    }
}
